/// Document validation command.
pub mod check;
/// Wrapped tree rendering helpers.
pub mod print;
/// Document decode and display command.
pub mod show;
/// Registry listing command.
pub mod types;
/// Shared registry and input helpers.
pub mod util;

#[cfg(test)]
mod test_support;
