//! Behavioral tests for the mock backend
//!
//! These exercise the handler contract end to end: read-after-write identity,
//! name conflicts, delete semantics, and isolation between instance names.

use polycloud_core::{
    CloudConnection, CloudError, PublicIpRequest, ResourceId, SecurityRequest,
};
use polycloud_mock::{MockCloud, MockRegistry};
use serde_json::json;

fn sg_request(name: &str) -> SecurityRequest {
    SecurityRequest {
        name: name.to_string(),
        vpc: ResourceId::new("vpc-1", "vpc-1"),
        direction: "inbound".to_string(),
        rules: Vec::new(),
    }
}

#[tokio::test]
async fn create_then_get_returns_same_identity() {
    let cloud = MockCloud::new("m1");
    let ips = cloud.public_ip_handler();

    let created = ips.create(PublicIpRequest::new("ip-1")).await.unwrap();
    let fetched = ips.get("ip-1").await.unwrap();

    assert_eq!(created.id, fetched.id);
    assert_eq!(fetched.id.name, "ip-1");
    assert_eq!(fetched.id.system_id, "ip-1");
    assert!(!fetched.id.is_empty());
}

#[tokio::test]
async fn list_on_fresh_instance_is_empty_not_an_error() {
    let cloud = MockCloud::new("m2");

    let ips = cloud.public_ip_handler().list().await.unwrap();
    assert!(ips.is_empty());
    assert!(ips.omitted.is_empty());

    let sgs = cloud.security_handler().list().await.unwrap();
    assert!(sgs.is_empty());
}

#[tokio::test]
async fn duplicate_create_conflicts_and_leaves_existing_untouched() {
    let cloud = MockCloud::new("m1");
    let ips = cloud.public_ip_handler();

    let first = ips.create(PublicIpRequest::new("ip-1")).await.unwrap();
    let err = ips.create(PublicIpRequest::new("ip-1")).await.unwrap_err();
    assert!(matches!(err, CloudError::Conflict(name) if name == "ip-1"));

    let listing = ips.list().await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing.items[0].address, first.address);
}

#[tokio::test]
async fn delete_removes_exactly_one_and_preserves_order() {
    let cloud = MockCloud::new("m1");
    let ips = cloud.public_ip_handler();

    for name in ["ip-a", "ip-b", "ip-c"] {
        ips.create(PublicIpRequest::new(name)).await.unwrap();
    }

    assert!(ips.delete("ip-b").await.unwrap());
    assert!(!ips.delete("ip-b").await.unwrap());

    let names: Vec<String> = ips
        .list()
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|info| info.id.name)
        .collect();
    assert_eq!(names, vec!["ip-a", "ip-c"]);
}

#[tokio::test]
async fn delete_on_absent_name_is_false_not_an_error() {
    let cloud = MockCloud::new("m1");
    assert!(!cloud.public_ip_handler().delete("ghost").await.unwrap());
    assert!(!cloud.security_handler().delete("ghost").await.unwrap());
}

#[tokio::test]
async fn instances_are_isolated_within_one_registry() {
    let registry = MockRegistry::new();
    let one = registry.connect("m1").public_ip_handler();
    let two = registry.connect("m2").public_ip_handler();

    one.create(PublicIpRequest::new("ip-1")).await.unwrap();

    assert!(two.list().await.unwrap().is_empty());
    let err = two.get("ip-1").await.unwrap_err();
    assert!(err.is_not_found());

    // same name in the other instance is no conflict
    two.create(PublicIpRequest::new("ip-1")).await.unwrap();
    assert_eq!(one.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn listing_is_a_defensive_copy() {
    let cloud = MockCloud::new("m1");
    let ips = cloud.public_ip_handler();
    ips.create(PublicIpRequest::new("ip-1")).await.unwrap();

    let mut listing = ips.list().await.unwrap();
    listing.items[0].id.name = "mangled".to_string();
    listing.items.clear();

    let fresh = ips.list().await.unwrap();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh.items[0].id.name, "ip-1");
}

#[tokio::test]
async fn security_group_lifecycle_scenario() {
    let cloud = MockCloud::new("m1");
    let sgs = cloud.security_handler();

    sgs.create(sg_request("sg-1")).await.unwrap();

    let info = sgs.get("sg-1").await.unwrap();
    assert_eq!(info.id, ResourceId::new("sg-1", "sg-1"));
    assert_eq!(info.direction, "inbound");
    assert!(info.rules.is_empty());

    assert!(sgs.delete("sg-1").await.unwrap());
    assert!(sgs.get("sg-1").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn security_rules_are_kept_opaque() {
    let cloud = MockCloud::new("m1");
    let sgs = cloud.security_handler();

    let mut req = sg_request("sg-rules");
    req.rules = vec![json!({"IPProtocol": "tcp", "ports": ["22"]})];
    sgs.create(req).await.unwrap();

    let info = sgs.get("sg-rules").await.unwrap();
    assert_eq!(info.rules.len(), 1);
    assert_eq!(info.rules[0]["IPProtocol"], "tcp");
}

#[tokio::test]
async fn concurrent_creates_yield_one_winner_per_name() {
    let registry = MockRegistry::new();
    let mut tasks = Vec::new();
    for _ in 0..8 {
        let ips = registry.connect("racy").public_ip_handler();
        tasks.push(tokio::spawn(async move {
            ips.create(PublicIpRequest::new("ip-1")).await.is_ok()
        }));
    }

    let mut wins = 0;
    for task in tasks {
        if task.await.unwrap() {
            wins += 1;
        }
    }
    assert_eq!(wins, 1);

    let ips = registry.connect("racy").public_ip_handler();
    assert_eq!(ips.list().await.unwrap().len(), 1);
}
