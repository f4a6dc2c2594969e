//! PDF text extraction.

use std::panic::{catch_unwind, AssertUnwindSafe};

/// Extract the text of every page, in order.
///
/// `pdf-extract` panics on some malformed documents, so panics are
/// reported as errors alongside its regular failures.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, String> {
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(e.to_string()),
        Err(panic) => Err(panic_message(panic.as_ref())),
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "malformed document".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_an_error() {
        assert!(extract_pdf_text(b"definitely not a pdf").is_err());
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(extract_pdf_text(&[]).is_err());
    }
}
