/// main() for AWS Lambda
#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    use lambda_runtime::{run, service_fn};

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    run(service_fn(lambda_handler)).await?;
    Ok(())
}

/// Lambda handler for the scheduled EventBridge invocation
async fn lambda_handler(
    event: lambda_runtime::LambdaEvent<serde_json::Value>,
) -> Result<serde_json::Value, lambda_runtime::Error> {
    tracing::info!(event = %event.payload, "scheduled invocation");

    let config = eip_notify::Config::from_env()?;
    eip_notify::publish_report(&config).await?;

    Ok(serde_json::json!({
        "statusCode": 200,
        "body": "Success",
    }))
}
