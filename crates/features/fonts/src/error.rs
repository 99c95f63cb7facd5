use std::borrow::Cow;

/// Error types specific to the fonts feature.
///
/// Registry and URL operations never fail; only wiring configured fonts does.
#[fontloom_derive::fontloom_error]
pub enum FontsError {
    /// A configured font declaration cannot be enqueued.
    #[error("Invalid font declaration{}: {message}", format_context(.context))]
    InvalidDeclaration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal fonts error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
