//! Configration in TOML format, or environment variables on Lambda
//!
use crate::Error;

#[derive(serde::Deserialize)]
pub struct Config {
    configuration_aggregator_name: String,
    topic_arn: String,
    #[serde(default)]
    region: Option<String>,
}

impl Config {
    pub fn from_file<P: AsRef<std::path::Path>>(config_file: P) -> Result<Self, Error> {
        use std::io::Read;

        // Read eipnotify.toml file
        let mut f = std::fs::File::open(config_file)?;
        let mut toml_str = String::new();
        f.read_to_string(&mut toml_str)?;

        Self::from_str(&toml_str)
    }

    pub fn from_str(cfg_toml_str: &str) -> Result<Self, Error> {
        let config = toml::from_str::<Config>(cfg_toml_str)?;
        Ok(config)
    }

    /// Lambda runs without a config file; the function environment carries
    /// the same parameters
    pub fn from_env() -> Result<Self, Error> {
        let configuration_aggregator_name =
            std::env::var("AGGREGATOR_NAME").map_err(|_| Error::MissingEnvVar("AGGREGATOR_NAME"))?;
        let topic_arn =
            std::env::var("TOPIC_ARN").map_err(|_| Error::MissingEnvVar("TOPIC_ARN"))?;

        Ok(Self {
            configuration_aggregator_name,
            topic_arn,
            region: None,
        })
    }

    pub fn configuration_aggregator_name<'a>(&'a self) -> &'a str {
        self.configuration_aggregator_name.as_str()
    }

    pub fn topic_arn<'a>(&'a self) -> &'a str {
        self.topic_arn.as_str()
    }

    pub fn region(&self) -> Option<aws_config::Region> {
        self.region
            .as_ref()
            .map(|r| aws_config::Region::new(r.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn parse_config_toml() {
        let toml_str = r#"
configuration_aggregator_name = "aws-controltower-GuardrailsComplianceAggregator"
topic_arn = "arn:aws:sns:ap-northeast-1:123456789012:ChatBotTopic"
region = "ap-northeast-1"
"#;
        let config = Config::from_str(toml_str).unwrap();
        assert_eq!(
            config.configuration_aggregator_name(),
            "aws-controltower-GuardrailsComplianceAggregator"
        );
        assert_eq!(
            config.topic_arn(),
            "arn:aws:sns:ap-northeast-1:123456789012:ChatBotTopic"
        );
        assert_eq!(config.region().unwrap().as_ref(), "ap-northeast-1");
    }

    #[test]
    fn region_is_optional() {
        let toml_str = r#"
configuration_aggregator_name = "my-aggregator"
topic_arn = "arn:aws:sns:us-east-1:123456789012:Topic"
"#;
        let config = Config::from_str(toml_str).unwrap();
        assert!(config.region().is_none());
    }
}
