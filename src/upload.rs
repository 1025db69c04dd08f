use backoff::{backoff::Backoff, future::retry_notify, Error as BackoffError, ExponentialBackoff};
use elasticsearch::{http::transport::Transport, indices::IndicesPutTemplateParts, Elasticsearch};
use serde_json::Value;
use std::time::Duration;

use crate::error::Error;

pub fn client(host: &str) -> Result<Elasticsearch, Error> {
    let transport = Transport::single_node(host)?;
    Ok(Elasticsearch::new(transport))
}

fn backoff_default() -> ExponentialBackoff {
    let mut eb = ExponentialBackoff {
        current_interval: Duration::from_secs(1),
        initial_interval: Duration::from_secs(1),
        randomization_factor: 0.5,
        multiplier: 2.0,
        max_interval: Duration::from_secs(30),
        max_elapsed_time: Some(Duration::from_secs(120)),
        ..ExponentialBackoff::default()
    };
    eb.reset();
    eb
}

/// Stores `body` as the legacy index template `name`, retrying transport
/// failures and 5xx answers until the backoff gives up. A 4xx answer fails at once.
pub async fn put_template(client: &Elasticsearch, name: &str, body: &Value) -> Result<(), Error> {
    put_template_with(client, name, body, backoff_default()).await
}

async fn put_template_with(
    client: &Elasticsearch,
    name: &str,
    body: &Value,
    backoff: ExponentialBackoff,
) -> Result<(), Error> {
    let res = retry_notify(
        backoff,
        || async {
            let res = client
                .indices()
                .put_template(IndicesPutTemplateParts::Name(name))
                .body(body)
                .send()
                .await
                .map_err(BackoffError::Transient)?;
            let rejected = res.status_code().is_client_error();
            res.error_for_status_code().map_err(|e| {
                if rejected {
                    BackoffError::Permanent(e)
                } else {
                    BackoffError::Transient(e)
                }
            })
        },
        |e, dur| log::warn!("[upload] Error happened at {:?}: {}", dur, e),
    )
    .await?;
    log::info!("[upload] Template {} stored ({})", name, res.status_code());
    Ok(())
}
