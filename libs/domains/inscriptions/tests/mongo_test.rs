//! Runs against a throwaway MongoDB container: `cargo test -- --ignored`.

use crud::CrudRepository;
use domain_inscriptions::{EventInscription, EventInscriptionId, InscriptionRepository, MongoInscriptionRepository};
use test_utils::{TestDataBuilder, TestMongo};

#[tokio::test]
#[ignore = "requires docker"]
async fn composite_key_round_trips_through_mongo() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("composite_key_round_trips_through_mongo");
    let repo = MongoInscriptionRepository::new(&mongo.database(&builder.database()));
    repo.ensure_indexes().await.unwrap();

    let event = builder.event_name("main");
    let user = builder.username("alba");
    let mut inscription = EventInscription::new(&event, &user);
    repo.save(inscription.clone()).await.unwrap();

    inscription.character = Some("Grumete".to_string());
    repo.save(inscription.clone()).await.unwrap();

    let found = repo
        .find_by_id(&EventInscriptionId::new(&event, &user))
        .await
        .unwrap();
    assert_eq!(found, Some(inscription));
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn find_by_event_queries_the_nested_key() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("find_by_event_queries_the_nested_key");
    let repo = MongoInscriptionRepository::new(&mongo.database(&builder.database()));

    repo.save(EventInscription::new("Hierro", "alba")).await.unwrap();
    repo.save(EventInscription::new("Hierro", "bruno")).await.unwrap();
    repo.save(EventInscription::new("Bronce", "alba")).await.unwrap();

    let mut users: Vec<String> = repo
        .find_by_event("Hierro")
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id.user)
        .collect();
    users.sort();
    assert_eq!(users, ["alba", "bruno"]);
}
