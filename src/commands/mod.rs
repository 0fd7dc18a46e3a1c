pub mod book;
pub mod cancel;
pub mod edit;
pub mod export;
pub mod status;

/// Identity for mutating commands: the `--email` flag, falling back to
/// the ROOMCAL_EMAIL environment variable (the CLI's stand-in for the
/// original's remembered login).
pub fn identity(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var("ROOMCAL_EMAIL").ok())
        .filter(|e| !e.trim().is_empty())
}
