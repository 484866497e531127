//! Device model tests against a mock transport.

use std::collections::HashSet;
use std::sync::Arc;

use rfcast_commands::CommandService;
use rfcast_core::{BridgeConfig, CommandCode, RawCommand, fan, light};
use rfcast_devices::{CeilingFan, FanLight};
use rfcast_testing::MockTransport;

fn service_with_mock() -> (Arc<CommandService>, Arc<MockTransport>) {
    let config = BridgeConfig::new("192.168.1.40", "0");
    let transport = Arc::new(MockTransport::new());
    let service = Arc::new(CommandService::new(config, transport.clone()));
    (service, transport)
}

fn url_for(code: CommandCode) -> String {
    RawCommand::build(code, "0", 40)
        .unwrap()
        .bridge_url("192.168.1.40")
}

#[tokio::test]
async fn reads_answer_from_cache_without_transport() {
    let (service, transport) = service_with_mock();
    let fan = CeilingFan::new(service.clone());
    let light = FanLight::new(service);

    assert!(!fan.on().await);
    assert_eq!(fan.rotation_speed().await, 100);
    assert!(!light.on().await);
    assert_eq!(light.brightness().await, 100);

    assert_eq!(transport.started(), 0);
}

#[tokio::test]
async fn fan_writes_transmit_motor_codes() {
    let (service, transport) = service_with_mock();
    let fan = CeilingFan::new(service.clone());

    fan.set_rotation_speed(50).await.unwrap();
    assert!(fan.on().await);
    fan.set_on(false).await.unwrap();
    assert!(!fan.on().await);
    service.wait_idle().await;

    let requests: HashSet<String> = transport.requests().await.into_iter().collect();
    let expected: HashSet<String> =
        [url_for(fan::MEDIUM), url_for(fan::OFF)].into_iter().collect();
    assert_eq!(requests, expected);
}

#[tokio::test]
async fn fan_power_on_resumes_cached_speed() {
    let (service, transport) = service_with_mock();
    let fan = CeilingFan::new(service.clone());

    fan.set_rotation_speed(20).await.unwrap();
    fan.set_on(false).await.unwrap();
    fan.set_on(true).await.unwrap();
    service.wait_idle().await;

    let requests = transport.requests().await;
    assert_eq!(requests.len(), 3);
    // The final power-on resumes the cached 20% -> low speed.
    assert!(requests.contains(&url_for(fan::LOW)));
    assert!(requests.contains(&url_for(fan::OFF)));
}

#[tokio::test]
async fn unchanged_power_write_submits_nothing() {
    let (service, transport) = service_with_mock();
    let fan = CeilingFan::new(service.clone());
    let light = FanLight::new(service.clone());

    fan.set_on(false).await.unwrap();
    light.set_on(false).await.unwrap();
    service.wait_idle().await;

    assert_eq!(transport.started(), 0);
    assert_eq!(service.stats().await.dispatched, 0);
}

#[tokio::test]
async fn light_writes_transmit_dimmer_codes() {
    let (service, transport) = service_with_mock();
    let light_model = FanLight::new(service.clone());

    light_model.set_brightness(75).await.unwrap();
    light_model.set_brightness(0).await.unwrap();
    assert!(!light_model.on().await);
    service.wait_idle().await;

    let requests: HashSet<String> = transport.requests().await.into_iter().collect();
    let expected: HashSet<String> = [
        url_for(light::BRIGHTNESS_LEVELS[5]),
        url_for(light::OFF),
    ]
    .into_iter()
    .collect();
    assert_eq!(requests, expected);
}

#[tokio::test]
async fn light_power_toggle_uses_power_codes() {
    let (service, transport) = service_with_mock();
    let light_model = FanLight::new(service.clone());

    light_model.set_on(true).await.unwrap();
    light_model.set_on(false).await.unwrap();
    service.wait_idle().await;

    let requests: HashSet<String> = transport.requests().await.into_iter().collect();
    let expected: HashSet<String> =
        [url_for(light::ON), url_for(light::OFF)].into_iter().collect();
    assert_eq!(requests, expected);
}
