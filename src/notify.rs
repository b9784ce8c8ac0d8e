use crate::Error;

/// Publish the chat payload to the SNS topic watched by the chat integration
pub async fn publish_to_sns(
    topic_arn: &str,
    message: &str,
    aws_sdk_config: &aws_config::SdkConfig,
) -> Result<(), Error> {
    let client = aws_sdk_sns::Client::new(aws_sdk_config);

    let resp = client
        .publish()
        .topic_arn(topic_arn)
        .message(message)
        .send()
        .await?;

    tracing::info!(message_id = ?resp.message_id(), "report published");

    Ok(())
}
