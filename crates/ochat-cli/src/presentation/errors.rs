//! Actionable hints for common failures.

use ochat_client::ClientError;

/// A follow-up suggestion for `err`, if one applies.
pub fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    let client_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ClientError>())?;

    match client_error {
        ClientError::Unreachable { .. } => {
            Some("Is the server running? Start it with `ochat serve` in another terminal.")
        }
        ClientError::NotFound { .. } => {
            Some("Check the model name and tag at https://ollama.com/library.")
        }
        ClientError::Timeout { .. } => {
            Some("The server is busy or loading a large model; try again in a moment.")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::time::Duration;

    #[test]
    fn test_hint_found_through_context() {
        let err: anyhow::Result<()> = Err(ClientError::NotFound {
            model: "ghost".into(),
        })
        .context("Failed to pull 'ghost'");
        let err = err.unwrap_err();

        assert!(hint_for(&err).unwrap().contains("ollama.com/library"));
    }

    #[test]
    fn test_timeout_hint() {
        let err = anyhow::Error::new(ClientError::Timeout {
            operation: ochat_client::Operation::Chat,
            after: Duration::from_secs(60),
        });
        assert!(hint_for(&err).is_some());
    }

    #[test]
    fn test_no_hint_for_other_errors() {
        let err = anyhow::anyhow!("something else");
        assert!(hint_for(&err).is_none());

        let rejected = anyhow::Error::new(ClientError::RequestRejected {
            status: 500,
            message: "boom".into(),
        });
        assert!(hint_for(&rejected).is_none());
    }
}
