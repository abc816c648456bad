use plant_care::{
    models::{PlantDraft, PlantId, PlantType, SunlightNeeds, WateringFrequency},
    AppError, Config, FetchOutcome, HttpPlantApi, PlantApi, PlantStore,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plant_json(id: i64, name: &str, plant_type: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": plant_type,
        "wateringFrequency": "weekly",
        "sunlightNeeds": "medium",
        "careNotes": "Water when the top inch of soil is dry.",
        "imageUrl": null,
        "lastWatered": "2024-01-15",
        "nextWatering": "2024-01-22",
        "addedDate": "2024-01-01",
        "createdAt": "2024-01-01T10:00:00",
        "updatedAt": "2024-01-15T10:00:00"
    })
}

async fn setup() -> (MockServer, PlantStore<HttpPlantApi>) {
    let server = MockServer::start().await;
    let config = Config::with_base_url(&format!("{}/api/", server.uri())).unwrap();
    let api = HttpPlantApi::new(&config).unwrap();
    (server, PlantStore::new(api, &config))
}

async fn mount_list(server: &MockServer, plants: Value) {
    Mock::given(method("GET"))
        .and(path("/api/plants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(plants))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_all_loads_working_set() {
    let (server, mut store) = setup().await;
    mount_list(
        &server,
        json!([
            plant_json(1, "Fiddle Leaf Fig", "tropical"),
            plant_json(2, "Snake Plant", "succulent")
        ]),
    )
    .await;

    assert_eq!(store.fetch_all().await, FetchOutcome::Loaded(2));
    assert_eq!(store.get(PlantId(2)).unwrap().plant_type, PlantType::Succulent);
    assert!(store.api().base_url().ends_with("/api"));
}

#[tokio::test]
async fn test_fetch_all_tolerates_unknown_sunlight() {
    let (server, mut store) = setup().await;
    let mut aloe = plant_json(12, "Real Aloe", "succulent");
    aloe["sunlightNeeds"] = json!("bright");
    let mut monstera = plant_json(11, "Real Monstera", "tropical");
    monstera["sunlightNeeds"] = json!("High");
    mount_list(&server, json!([monstera, aloe])).await;

    assert_eq!(store.fetch_all().await, FetchOutcome::Loaded(2));
    let names: Vec<&str> = store.plants().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Real Monstera", "Real Aloe"]);
    assert_eq!(store.get(PlantId(11)).unwrap().sunlight_needs, SunlightNeeds::High);
    assert_eq!(store.get(PlantId(12)).unwrap().sunlight_needs, SunlightNeeds::Medium);
}

#[tokio::test]
async fn test_fetch_all_server_error_uses_samples() {
    let (server, mut store) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/plants"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = store.fetch_all().await;
    assert!(matches!(outcome, FetchOutcome::FallbackUsed { .. }));
    assert_eq!(store.len(), 2);
    assert_eq!(store.plants()[0].name, "Fiddle Leaf Fig");
}

#[tokio::test]
async fn test_create_posts_draft_and_appends_result() {
    let (server, mut store) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/plants"))
        .and(body_partial_json(json!({
            "name": "Basil",
            "type": "herb",
            "wateringFrequency": "daily",
            "sunlightNeeds": "high"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(plant_json(31, "Basil", "herb")))
        .expect(1)
        .mount(&server)
        .await;

    let draft = PlantDraft::new(
        "Basil",
        PlantType::Herb,
        WateringFrequency::Daily,
        SunlightNeeds::High,
    );
    let created = store.create(draft).await.unwrap();

    assert_eq!(created.id, PlantId(31));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_create_without_type_sends_nothing() {
    let (server, mut store) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/plants"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let draft = PlantDraft {
        plant_type: None,
        ..PlantDraft::new("Basil", PlantType::Herb, WateringFrequency::Daily, SunlightNeeds::High)
    };
    assert!(store.create(draft).await.unwrap_err().is_validation());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let (server, mut store) = setup().await;
    mount_list(&server, json!([plant_json(4, "Pothos", "tropical")])).await;
    Mock::given(method("PUT"))
        .and(path("/api/plants/4"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    store.fetch_all().await;
    let before = store.plants().to_vec();
    let mut edited = before[0].clone();
    edited.name = "Golden Pothos".to_string();

    let err = store.update(edited).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(store.plants(), before.as_slice());
}

#[tokio::test]
async fn test_update_replaces_with_server_record() {
    let (server, mut store) = setup().await;
    mount_list(&server, json!([plant_json(4, "Pothos", "tropical")])).await;

    let mut echoed = plant_json(4, "Golden Pothos", "tropical");
    echoed["careNotes"] = Value::Null;
    echoed["updatedAt"] = json!("2024-01-16T09:00:00");
    Mock::given(method("PUT"))
        .and(path("/api/plants/4"))
        .and(body_partial_json(json!({ "name": "Golden Pothos" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(echoed))
        .expect(1)
        .mount(&server)
        .await;

    store.fetch_all().await;
    let mut edited = store.get(PlantId(4)).unwrap().clone();
    edited.name = "Golden Pothos".to_string();
    store.update(edited).await.unwrap();

    let local = store.get(PlantId(4)).unwrap();
    assert_eq!(local.name, "Golden Pothos");
    assert_eq!(local.care_notes, None);
}

#[tokio::test]
async fn test_delete_failure_keeps_record() {
    let (server, mut store) = setup().await;
    mount_list(
        &server,
        json!([plant_json(1, "Fern", "fern"), plant_json(2, "Cactus", "cactus")]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/api/plants/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/plants/2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    store.fetch_all().await;
    let cactus = store.get(PlantId(2)).unwrap().clone();

    store.delete(PlantId(1)).await.unwrap();
    assert!(store.get(PlantId(1)).is_none());

    assert!(store.delete(PlantId(2)).await.unwrap_err().is_transport());
    assert_eq!(store.get(PlantId(2)), Some(&cactus));
}

#[tokio::test]
async fn test_water_merges_returned_dates() {
    let (server, mut store) = setup().await;
    mount_list(&server, json!([plant_json(7, "Peace Lily", "flowering")])).await;
    Mock::given(method("POST"))
        .and(path("/api/plants/7/water"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lastWatered": "2024-01-20",
            "nextWatering": "2024-01-27"
        })))
        .expect(1)
        .mount(&server)
        .await;

    store.fetch_all().await;
    let watered = store.record_watering(PlantId(7)).await.unwrap();

    assert_eq!(watered.last_watered.unwrap().to_string(), "2024-01-20");
    assert_eq!(watered.next_watering.unwrap().to_string(), "2024-01-27");
    assert_eq!(watered.name, "Peace Lily");
    assert!(watered.care_notes.is_some());
}

#[tokio::test]
async fn test_stats_requests_are_combined() {
    let (server, store) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/plants/total-plants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(15)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/plants/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalPlants": 15,
            "plantsNeedingWatering": 6
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = store.refresh_stats().await;
    assert_eq!(stats.total_plants, 15);
    assert_eq!(stats.plants_needing_watering, 6);
    assert_eq!(stats.plants_needing_sunlight, 0);
}

#[tokio::test]
async fn test_care_guide_uses_content_disposition() {
    let (server, store) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/pdf/plant/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "content-disposition",
                    r#"attachment; filename="Aloe_Vera_Care_Guide.html""#,
                )
                .set_body_bytes(b"<html>Aloe</html>".to_vec()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pdf/plant/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let saved = store.download_care_guide(PlantId(3), dir.path()).await.unwrap();
    assert_eq!(saved, dir.path().join("Aloe_Vera_Care_Guide.html"));
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "<html>Aloe</html>");

    let missing = store.download_care_guide(PlantId(99), dir.path()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_read_endpoints() {
    let (server, store) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/plants/search"))
        .and(query_param("name", "fig"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([plant_json(1, "Fiddle Leaf Fig", "tropical")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/plants/type/cactus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/plants/needs-watering"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([plant_json(2, "Basil", "herb")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/plants/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(plant_json(2, "Basil", "herb")))
        .mount(&server)
        .await;

    let api = store.api();
    assert_eq!(api.search_plants("fig").await.unwrap()[0].name, "Fiddle Leaf Fig");
    assert!(api.plants_by_type(PlantType::Cactus).await.unwrap().is_empty());
    assert_eq!(api.plants_needing_watering().await.unwrap().len(), 1);
    assert_eq!(api.get_plant(PlantId(2)).await.unwrap().plant_type, PlantType::Herb);
}
