// src/macros.rs
//! Owned-string shorthands used throughout the parsers.

/// `s!()` is an empty `String`; `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string slices into one `String`, allocated once.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let parts: &[&str] = &[$first $(, $rest)+];
        let mut out = ::std::string::String::with_capacity(parts.iter().map(|p| p.len()).sum());
        for part in parts {
            out.push_str(part);
        }
        out
    }};
}

/// Table row literal: `cells!["Καρδιολογική", "ΛΑΪΚΟ", ""]` is a `Vec<String>`.
#[macro_export]
macro_rules! cells {
    ($($cell:expr),* $(,)?) => {
        vec![$(::std::string::String::from($cell)),*]
    };
}
