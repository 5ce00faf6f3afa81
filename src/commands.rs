use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use crate::cli::Commands;
use crate::client::{InfoswebClient, Transport};

/// Run one parsed command, writing its result to `out`.
pub async fn execute<T: Transport, W: Write>(
    client: &InfoswebClient<T>,
    command: Commands,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Commands::Token { raw } => {
            let token = client.request_token().await?;
            if raw {
                writeln!(out, "{}", token.access_token).context("failed to write token")?;
            } else {
                print_json(out, &token)?;
            }
        }
        Commands::Activate(args) => {
            let result = client
                .activate_user(&args.username, args.access_token.as_deref())
                .await?;
            print_json(out, &result)?;
        }
        Commands::Deactivate(args) => {
            let result = client
                .deactivate_user(&args.username, args.access_token.as_deref())
                .await?;
            print_json(out, &result)?;
        }
    }
    Ok(())
}

/// Pretty-print with two-space indentation, keeping non-ASCII as-is.
fn print_json<W: Write, S: Serialize>(out: &mut W, value: &S) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to write JSON output")?;
    writeln!(out).context("failed to write JSON output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::UserArgs;
    use crate::client::tests::RecordingTransport;
    use crate::config::Config;
    use crate::errors::InfoswebError;
    use serde_json::json;

    fn client(transport: RecordingTransport) -> InfoswebClient<RecordingTransport> {
        InfoswebClient::with_transport(
            Config::new("http://example.test").with_credentials("id", "secret"),
            transport,
        )
    }

    #[tokio::test]
    async fn test_token_raw_prints_only_bearer() {
        let client = client(
            RecordingTransport::default()
                .respond(200, json!({"access_token": "tok-xyz", "expires_in": 60})),
        );
        let mut out = Vec::new();
        execute(&client, Commands::Token { raw: true }, &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "tok-xyz\n");
    }

    #[tokio::test]
    async fn test_token_prints_full_json() {
        let client = client(
            RecordingTransport::default()
                .respond(200, json!({"access_token": "tok-xyz", "expires_in": 60})),
        );
        let mut out = Vec::new();
        execute(&client, Commands::Token { raw: false }, &mut out)
            .await
            .unwrap();
        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["access_token"], "tok-xyz");
        assert_eq!(printed["token_type"], "Bearer");
        assert_eq!(printed["expires_in"], 60);
    }

    #[tokio::test]
    async fn test_deactivate_prints_remote_body_unchanged() {
        let remote = json!({"estado": "OK", "detalle": [{"módulo": "núcleo"}]});
        let client = client(RecordingTransport::default().respond(200, remote.clone()));
        let mut out = Vec::new();
        execute(
            &client,
            Commands::Deactivate(UserArgs {
                username: "oipozo@Panama.Banesco.Lac".into(),
                access_token: Some("given".into()),
            }),
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("núcleo"), "non-ASCII must not be escaped: {}", text);
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"estado\""));
        let printed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(printed, remote);
    }

    #[tokio::test]
    async fn test_errors_reach_command_boundary_as_infosweb_error() {
        let client = client(
            RecordingTransport::default().respond(403, json!({"estado": "ERROR"})),
        );
        let mut out = Vec::new();
        let err = execute(
            &client,
            Commands::Activate(UserArgs {
                username: "jdoe".into(),
                access_token: Some("given".into()),
            }),
            &mut out,
        )
        .await
        .unwrap_err();

        let inner = err.downcast_ref::<InfoswebError>().unwrap();
        assert_eq!(inner.status(), Some(403));
        assert_eq!(inner.exit_code(), 1);
        assert!(out.is_empty());
    }
}
