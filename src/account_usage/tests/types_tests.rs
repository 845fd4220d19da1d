use super::*;

#[test]
fn test_category_from_known_tags() {
    assert_eq!(UsageCategory::from_tag("flow"), UsageCategory::Flow);
    assert_eq!(UsageCategory::from_tag("fee"), UsageCategory::Fee);
    assert_eq!(UsageCategory::from_tag("voice"), UsageCategory::Voice);
    assert_eq!(UsageCategory::from_tag("point"), UsageCategory::Point);
    assert_eq!(UsageCategory::from_tag("credit"), UsageCategory::Credit);
    assert_eq!(UsageCategory::from_tag("woPay"), UsageCategory::Voucher);
}

#[test]
fn test_category_unknown_tag_passes_through() {
    let category = UsageCategory::from_tag("sms");
    assert_eq!(category, UsageCategory::Unknown("sms".to_string()));
    assert_eq!(category.display_name(), "sms");
    assert!(!category.is_primary());
}

#[test]
fn test_category_tags_are_case_sensitive() {
    assert_eq!(
        UsageCategory::from_tag("Flow"),
        UsageCategory::Unknown("Flow".to_string())
    );
}

#[test]
fn test_category_display_names() {
    assert_eq!(format!("{}", UsageCategory::Flow), "流量");
    assert_eq!(format!("{}", UsageCategory::Voucher), "电子券");
}

#[test]
fn test_raw_entry_accepts_numeric_quantity() {
    let entry: RawUsageEntry = serde_json::from_str(
        r#"{"type":"fee","usedTitle":"剩余50%","number":12.5,"unit":"元","remainTitle":"剩余话费"}"#,
    )
    .unwrap();
    assert_eq!(entry.number, "12.5");
    assert_eq!(entry.category, "fee");
}

#[test]
fn test_raw_entry_defaults_optional_fields() {
    let entry: RawUsageEntry = serde_json::from_str(r#"{"usedTitle":"已用10%"}"#).unwrap();
    assert_eq!(entry.category, "");
    assert_eq!(entry.number, "");
    assert_eq!(entry.unit, "");
    assert_eq!(entry.remain_title, "");
}

#[test]
fn test_raw_entry_requires_used_title() {
    let result: Result<RawUsageEntry, _> = serde_json::from_str(r#"{"type":"flow"}"#);
    assert!(result.is_err());
}

#[test]
fn test_response_ignores_extra_fields() {
    let response: UserInfoResponse = serde_json::from_str(
        r#"{"flush_date_time":"x","code":"Y","data":{"dataList":[],"extra":1}}"#,
    )
    .unwrap();
    assert_eq!(response.flush_date_time, "x");
    assert!(response.data.data_list.is_empty());
}
