mod aws;
mod config;
mod notify;
mod report;

// re-exports
pub use aws::{AccountEipCount, AwsClient, EipInventory, UnassociatedEip};
pub use config::Config;
pub use notify::publish_to_sns;
pub use report::{build_description, chat_payload};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    TomlError(#[from] toml::de::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    ConfigSelectError(
        #[from]
        aws_sdk_config::error::SdkError<
            aws_sdk_config::operation::select_aggregate_resource_config::SelectAggregateResourceConfigError,
        >,
    ),
    #[error(transparent)]
    DescribeAccountError(
        #[from]
        aws_sdk_organizations::error::SdkError<
            aws_sdk_organizations::operation::describe_account::DescribeAccountError,
        >,
    ),
    #[error(transparent)]
    SnsPublishError(
        #[from] aws_sdk_sns::error::SdkError<aws_sdk_sns::operation::publish::PublishError>,
    ),
    #[error("Environment variable {0} is not set")]
    MissingEnvVar(&'static str),
}

/// Query the aggregator and render the report text, without publishing.
pub async fn render_report(config: &Config) -> Result<String, Error> {
    let aws_sdk_config = aws::aws_config_from_env(config.region()).await;
    let aws_client = AwsClient::new(&aws_sdk_config);

    let inventory =
        EipInventory::load(&aws_client, config.configuration_aggregator_name()).await?;

    Ok(report::build_description(&inventory))
}

/// Run the full pipeline: query the aggregator, resolve account names,
/// format the report and publish it to the SNS topic.
pub async fn publish_report(config: &Config) -> Result<(), Error> {
    let aws_sdk_config = aws::aws_config_from_env(config.region()).await;
    let aws_client = AwsClient::new(&aws_sdk_config);

    let inventory =
        EipInventory::load(&aws_client, config.configuration_aggregator_name()).await?;

    let description = report::build_description(&inventory);
    let payload = report::chat_payload(&description)?;

    notify::publish_to_sns(config.topic_arn(), &payload, &aws_sdk_config).await?;

    Ok(())
}
