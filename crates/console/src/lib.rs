//! `folio`: command-line front end for the portfolio CMS.
//!
//! Public pages (blog, projects, services, tools, contact, resume) and the
//! admin console (login, overview, edit-and-publish) as subcommands.

pub mod cli;
pub mod commands;
pub mod render;

pub use commands::{run, Context};

/// One-line description of a failed command.
pub fn error_line(err: &anyhow::Error) -> String {
    match err.downcast_ref::<folio_client::ClientError>() {
        Some(client_err) => client_err.user_message(),
        None => format!("{err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use folio_client::ClientError;

    use super::*;

    #[test]
    fn client_errors_render_their_user_message() {
        let err = anyhow::Error::from(ClientError::Api {
            status: 500,
            message: "Failed to fetch blogs".into(),
        });
        assert_eq!(error_line(&err), "Failed to fetch blogs");
    }

    #[test]
    fn other_errors_render_with_context_chain() {
        let err = anyhow::anyhow!("disk full").context("Failed to write preview");
        assert_eq!(error_line(&err), "Failed to write preview: disk full");
    }
}
