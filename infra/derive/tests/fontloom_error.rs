use fontloom_derive::fontloom_error;
use std::borrow::Cow;

#[fontloom_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[test]
fn fontloom_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/fontloom_error_pass.rs");
}

#[test]
fn source_errors_convert_with_context() {
    let res: Result<(), std::io::Error> = Err(std::io::Error::other("missing file"));
    let err = res.context("loading fonts.toml").unwrap_err();

    assert!(matches!(err, DemoError::Io { .. }));
    assert_eq!(err.to_string(), "IO error (loading fonts.toml): missing file");
}

#[test]
fn question_mark_uses_from_impl() {
    fn run() -> Result<(), DemoError> {
        Err(std::io::Error::other("denied"))?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert_eq!(err.to_string(), "IO error: denied");
}

#[test]
fn context_is_attached_to_existing_errors() {
    let res: Result<(), DemoError> =
        Err(DemoError::Rejected { message: "bad handle".into(), context: None });

    let err = res.context("enqueue").unwrap_err();
    assert_eq!(err.to_string(), "Rejected (enqueue): bad handle");
}

#[test]
fn strings_become_internal_errors() {
    let err: DemoError = "unexpected".into();
    assert!(matches!(err, DemoError::Internal { .. }));

    let err: DemoError = format!("code {}", 7).into();
    assert_eq!(err.to_string(), "Internal error: code 7");
}
