use crate::Error;

// Advanced queries against the configuration aggregator.
// Result rows come back as JSON document strings.
const COUNT_BY_ACCOUNT_EXPRESSION: &str =
    "SELECT accountId, COUNT(*) WHERE (resourceType = 'AWS::EC2::EIP') GROUP BY accountId;";
const UNASSOCIATED_EXPRESSION: &str = "SELECT accountId, awsRegion, configuration.publicIp WHERE (resourceType = 'AWS::EC2::EIP' AND relationships.resourceId NOT LIKE 'eni%') ORDER BY accountId;";

// Upper bound of in-flight DescribeAccount calls
const MAX_NAME_LOOKUPS: usize = 10;

/// Set region as "us-east-1", etc. or None for default region
pub async fn aws_config_from_env(region: Option<aws_config::Region>) -> aws_config::SdkConfig {
    if let Some(region) = region {
        // Specified region
        aws_config::from_env().region(region).load().await
    } else {
        // default region
        aws_config::from_env().load().await
    }
}

#[derive(Clone, Debug)]
pub struct AwsClient {
    config_client: aws_sdk_config::Client,
    organizations_client: aws_sdk_organizations::Client,
}

impl AwsClient {
    pub fn new(aws_sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            config_client: aws_sdk_config::Client::new(aws_sdk_config),
            organizations_client: aws_sdk_organizations::Client::new(aws_sdk_config),
        }
    }

    /// Run one aggregate query and collect rows from all pages
    async fn select_aggregate(
        &self,
        aggregator_name: &str,
        expression: &str,
    ) -> Result<Vec<String>, Error> {
        let mut rows = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            // Call Config SelectAggregateResourceConfig API
            let resp = self
                .config_client
                .select_aggregate_resource_config()
                .configuration_aggregator_name(aggregator_name)
                .expression(expression)
                .set_next_token(next_token)
                .send()
                .await?;

            rows.extend_from_slice(resp.results());

            next_token = resp.next_token().map(String::from);
            if next_token.is_none() {
                break;
            }
        }

        Ok(rows)
    }

    /// Account id -> account name, None if the account carries no name
    async fn account_name(&self, account_id: &str) -> Result<Option<String>, Error> {
        // Call Organizations DescribeAccount API
        let resp = self
            .organizations_client
            .describe_account()
            .account_id(account_id)
            .send()
            .await?;

        Ok(resp.account().and_then(|account| account.name()).map(String::from))
    }
}

// Count query rows look like {"accountId":"123456789012","COUNT(*)":3}
#[derive(serde::Deserialize)]
struct CountRow {
    #[serde(rename = "accountId")]
    account_id: String,
    #[serde(rename = "COUNT(*)")]
    count: u64,
}

// Unassociated query rows nest the IP under the resource configuration
#[derive(serde::Deserialize)]
struct UnassociatedRow {
    #[serde(rename = "accountId")]
    account_id: String,
    #[serde(rename = "awsRegion")]
    aws_region: String,
    configuration: EipConfiguration,
}

#[derive(serde::Deserialize)]
struct EipConfiguration {
    #[serde(rename = "publicIp")]
    public_ip: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountEipCount {
    pub account_id: String,
    pub account_name: Option<String>,
    pub eip_count: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnassociatedEip {
    pub account_id: String,
    pub region: String,
    pub public_ip: Option<String>,
}

pub struct EipInventory {
    account_counts: Vec<AccountEipCount>,
    unassociated: Vec<UnassociatedEip>,
}

impl EipInventory {
    pub fn new(account_counts: Vec<AccountEipCount>, unassociated: Vec<UnassociatedEip>) -> Self {
        Self {
            account_counts,
            unassociated,
        }
    }

    pub async fn load(aws_client: &AwsClient, aggregator_name: &str) -> Result<Self, Error> {
        let count_fut = aws_client.select_aggregate(aggregator_name, COUNT_BY_ACCOUNT_EXPRESSION);
        let unassociated_fut =
            aws_client.select_aggregate(aggregator_name, UNASSOCIATED_EXPRESSION);

        // concurrent execution of both aggregate queries
        let (count_rows, unassociated_rows) = futures::try_join!(count_fut, unassociated_fut)?;

        let mut inventory = Self::from_query_results(&count_rows, &unassociated_rows)?;
        inventory.resolve_account_names(aws_client).await?;

        Ok(inventory)
    }

    /// Parse raw aggregate query rows; account names stay unresolved
    pub fn from_query_results(
        count_rows: &[String],
        unassociated_rows: &[String],
    ) -> Result<Self, Error> {
        let account_counts = count_rows
            .iter()
            .map(|row| {
                let row = serde_json::from_str::<CountRow>(row)?;
                Ok(AccountEipCount {
                    account_id: row.account_id,
                    account_name: None,
                    eip_count: row.count,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let unassociated = unassociated_rows
            .iter()
            .map(|row| {
                let row = serde_json::from_str::<UnassociatedRow>(row)?;
                Ok(UnassociatedEip {
                    account_id: row.account_id,
                    region: row.aws_region,
                    public_ip: row.configuration.public_ip,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self::new(account_counts, unassociated))
    }

    /// Fill in account names, at most MAX_NAME_LOOKUPS calls in flight.
    /// buffered() keeps the row order.
    async fn resolve_account_names(&mut self, aws_client: &AwsClient) -> Result<(), Error> {
        use futures::stream::{StreamExt, TryStreamExt};

        let counts = std::mem::take(&mut self.account_counts);
        self.account_counts = futures::stream::iter(counts)
            .map(|mut row| async move {
                row.account_name = aws_client.account_name(&row.account_id).await?;
                Ok::<_, Error>(row)
            })
            .buffered(MAX_NAME_LOOKUPS)
            .try_collect()
            .await?;

        Ok(())
    }

    pub fn account_counts<'a>(&'a self) -> &'a [AccountEipCount] {
        self.account_counts.as_slice()
    }

    pub fn unassociated<'a>(&'a self) -> &'a [UnassociatedEip] {
        self.unassociated.as_slice()
    }
}
