/// Anything that can stand in for a title, including an absent one
///
/// Lets the public functions accept `&str`, `String`, and `Option` of
/// either without forcing callers to convert first. `None` is treated the
/// same as the empty string everywhere.
pub trait AsTitle {
    fn as_title(&self) -> Option<&str>;
}

impl AsTitle for str {
    fn as_title(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsTitle for String {
    fn as_title(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: AsTitle + ?Sized> AsTitle for &T {
    fn as_title(&self) -> Option<&str> {
        (**self).as_title()
    }
}

impl<T: AsTitle> AsTitle for Option<T> {
    fn as_title(&self) -> Option<&str> {
        self.as_ref().and_then(|t| t.as_title())
    }
}

/// The title text, or `""` when absent
pub(crate) fn title_text<T: AsTitle + ?Sized>(title: &T) -> &str {
    title.as_title().unwrap_or("")
}
