use fontloom_derive::fontloom_error;
use std::borrow::Cow;

#[fontloom_error]
pub enum StylesheetError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown handle{}: {message}", format_context(.context))]
    UnknownHandle { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), StylesheetError> {
    let io: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
    io.context("reading stylesheet")?;
    Ok(())
}

fn main() {
    let _ = read();
    let _: StylesheetError = "boom".into();
    let _: StylesheetError = String::from("boom").into();
}
