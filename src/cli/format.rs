//! Format output dispatch helpers

/// Dispatch output by format with minimal boilerplate.
///
/// ```rust,ignore
/// output_by_format!(ctx.cli.format,
///     json => { print_json(&value)? },
///     human => { print_table(&rows); }
/// );
/// ```
#[macro_export]
macro_rules! output_by_format {
    ($format:expr, json => $json:block, human => $human:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => $human,
        }
    };
}
