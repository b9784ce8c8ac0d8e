//! Turn the inventory into the chat notification payload
//!
use crate::{EipInventory, Error};

// Rendered in place of an empty table
const EMPTY_TABLE: &str = "none";

/// Report text with one table per result set
pub fn build_description(inventory: &EipInventory) -> String {
    let by_account_rows = inventory
        .account_counts()
        .iter()
        .map(|row| {
            vec![
                row.account_id.clone(),
                row.account_name.clone().unwrap_or_default(),
                row.eip_count.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    let by_account_table = markdown_table(&["AccountId", "AccountName", "EIPCount"], &by_account_rows);

    let unassociated_rows = inventory
        .unassociated()
        .iter()
        .map(|row| {
            vec![
                row.account_id.clone(),
                row.region.clone(),
                row.public_ip.clone().unwrap_or_default(),
            ]
        })
        .collect::<Vec<_>>();
    let unassociated_table = markdown_table(&["accountId", "region", "publicIp"], &unassociated_rows);

    format!(
        "Elastic IP report\n\n* EIP count by account\n{}\n* Unassociated EIPs\n{}",
        by_account_table, unassociated_table
    )
}

/// AWS Chatbot custom notification envelope
pub fn chat_payload(description: &str) -> Result<String, Error> {
    let payload = serde_json::json!({
        "version": "1.0",
        "source": "custom",
        "content": {
            "description": description,
        },
    });

    let payload_str = serde_json::to_string(&payload)?;
    Ok(payload_str)
}

fn markdown_table(columns: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return format!("{}\n", EMPTY_TABLE);
    }

    let mut table = String::new();

    // table header
    table.push_str(&columns.join(" | "));
    table.push('\n');

    // table header separator
    let separator = columns.iter().map(|_| "---").collect::<Vec<_>>().join(" | ");
    table.push_str(&separator);
    table.push('\n');

    // table body
    for row in rows {
        table.push_str(&row.join(" | "));
        table.push('\n');
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{build_description, chat_payload, markdown_table};
    use crate::{AccountEipCount, EipInventory, UnassociatedEip};

    fn sample_inventory() -> EipInventory {
        EipInventory::new(
            vec![
                AccountEipCount {
                    account_id: "111111111111".to_string(),
                    account_name: Some("workload-prod".to_string()),
                    eip_count: 3,
                },
                AccountEipCount {
                    account_id: "222222222222".to_string(),
                    account_name: None,
                    eip_count: 1,
                },
            ],
            vec![UnassociatedEip {
                account_id: "111111111111".to_string(),
                region: "ap-northeast-1".to_string(),
                public_ip: Some("203.0.113.10".to_string()),
            }],
        )
    }

    #[test]
    fn table_has_header_separator_and_rows() {
        let table = markdown_table(
            &["accountId", "region"],
            &[vec!["111111111111".to_string(), "us-east-1".to_string()]],
        );
        assert_eq!(
            table,
            "accountId | region\n--- | ---\n111111111111 | us-east-1\n"
        );
    }

    #[test]
    fn empty_table_renders_none() {
        assert_eq!(markdown_table(&["a", "b"], &[]), "none\n");
    }

    #[test]
    fn description_contains_both_tables() {
        let description = build_description(&sample_inventory());

        assert!(description.starts_with("Elastic IP report\n"));
        assert!(description.contains("AccountId | AccountName | EIPCount"));
        assert!(description.contains("111111111111 | workload-prod | 3"));
        // missing account name renders as an empty cell
        assert!(description.contains("222222222222 |  | 1"));
        assert!(description.contains("111111111111 | ap-northeast-1 | 203.0.113.10"));
    }

    #[test]
    fn description_without_unassociated_eips() {
        let inventory = EipInventory::new(
            vec![AccountEipCount {
                account_id: "111111111111".to_string(),
                account_name: Some("sandbox".to_string()),
                eip_count: 2,
            }],
            vec![],
        );
        let description = build_description(&inventory);

        assert!(description.ends_with("* Unassociated EIPs\nnone\n"));
    }

    #[test]
    fn payload_is_chatbot_custom_notification() {
        let payload_str = chat_payload("line one\nline two").unwrap();
        let payload = serde_json::from_str::<serde_json::Value>(&payload_str).unwrap();

        assert_eq!(payload["version"], "1.0");
        assert_eq!(payload["source"], "custom");
        assert_eq!(payload["content"]["description"], "line one\nline two");
    }
}
