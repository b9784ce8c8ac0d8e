#[test]
fn payload_from_query_results() {
    let count_rows = [
        r#"{"accountId":"111111111111","COUNT(*)":3}"#.to_string(),
        r#"{"accountId":"222222222222","COUNT(*)":1}"#.to_string(),
    ];
    let unassociated_rows = [
        r#"{"accountId":"111111111111","awsRegion":"ap-northeast-1","configuration":{"publicIp":"203.0.113.10"}}"#.to_string(),
        r#"{"accountId":"222222222222","awsRegion":"us-east-1","configuration":{}}"#.to_string(),
    ];

    let inventory =
        eip_notify::EipInventory::from_query_results(&count_rows, &unassociated_rows).unwrap();
    let description = eip_notify::build_description(&inventory);
    let payload_str = eip_notify::chat_payload(&description).unwrap();

    let payload = serde_json::from_str::<serde_json::Value>(&payload_str).unwrap();
    assert_eq!(payload["version"], "1.0");
    assert_eq!(payload["source"], "custom");

    let description = payload["content"]["description"].as_str().unwrap();
    assert!(description.contains("111111111111 |  | 3"));
    assert!(description.contains("111111111111 | ap-northeast-1 | 203.0.113.10"));
    // publicIp can be absent from the aggregated record
    assert!(description.contains("222222222222 | us-east-1 | \n"));
}
