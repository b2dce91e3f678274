use petmatch_api::domain::repository::{
    AdoptionRequestRepository, PetRepository, UserRepository,
};
use petmatch_api::domain::types::{NewAdoptionRequest, NewPet, NewUser, PetFilter, User, UserFilter};
use petmatch_api::error::ApiError;
use petmatch_api::state::AppState;
use petmatch_domain::adoption::AdoptionStatus;
use petmatch_domain::id::{AdoptionRequestId, UserId};
use petmatch_domain::pet::PetStatus;
use petmatch_domain::user::Role;

use crate::helpers::test_state;

fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        name: "Test".into(),
        email: email.into(),
        password_hash: "$argon2id$placeholder".into(),
        role,
        shelter_name: None,
        phone: Some("+54 341 000 0000".into()),
        city: None,
        is_approved: role != Role::Shelter,
    }
}

fn new_pet(shelter: &User, name: &str, species: &str, age: u32, location: &str) -> NewPet {
    NewPet {
        shelter_id: shelter.id,
        name: name.into(),
        species: species.into(),
        breed: String::new(),
        age,
        description: String::new(),
        location: location.into(),
        photo_url: None,
        status: PetStatus::Available,
    }
}

async fn seed(state: &AppState) -> (User, User) {
    let users = state.user_repo();
    let shelter = users
        .create(&new_user("paws@example.com", Role::Shelter))
        .await
        .unwrap();
    let adopter = users
        .create(&new_user("jane@example.com", Role::Adopter))
        .await
        .unwrap();
    (shelter, adopter)
}

#[tokio::test]
async fn should_round_trip_user_fields() {
    let state = test_state().await;
    let (shelter, _) = seed(&state).await;
    let users = state.user_repo();

    let found = users
        .find_by_email("paws@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, shelter.id);
    assert_eq!(found.role, Role::Shelter);
    assert!(!found.is_approved);
    assert_eq!(found.phone.as_deref(), Some("+54 341 000 0000"));
    assert!(found.city.is_none());

    assert!(users.find_by_id(UserId(9_999)).await.unwrap().is_none());
    assert!(users.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn should_map_unique_email_violation() {
    let state = test_state().await;
    seed(&state).await;

    let err = state
        .user_repo()
        .create(&new_user("paws@example.com", Role::Adopter))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EmailInUse));
}

#[tokio::test]
async fn should_approve_and_filter_users() {
    let state = test_state().await;
    let (shelter, _) = seed(&state).await;
    let users = state.user_repo();

    let pending = users
        .list(&UserFilter {
            role: Some(Role::Shelter),
            approved: Some(false),
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    users.set_approved(shelter.id).await.unwrap();
    assert!(users.find_by_id(shelter.id).await.unwrap().unwrap().is_approved);

    let all = users.list(&UserFilter::default()).await.unwrap();
    let emails: Vec<_> = all.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, ["jane@example.com", "paws@example.com"]);
}

#[tokio::test]
async fn should_filter_pets_conjunctively() {
    let state = test_state().await;
    let (shelter, _) = seed(&state).await;
    let pets = state.pet_repo();
    pets.create(&new_pet(&shelter, "Luna", "dog", 2, "Rosario, Santa Fe"))
        .await
        .unwrap();
    pets.create(&new_pet(&shelter, "Michi", "cat", 4, "Rosario"))
        .await
        .unwrap();
    pets.create(&new_pet(&shelter, "Rocky", "dog", 9, "Córdoba"))
        .await
        .unwrap();

    let found = pets
        .list(&PetFilter {
            species: Some("dog".into()),
            location: Some("Rosario".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Luna");

    // LIKE ignores ASCII case
    let any_case = pets
        .list(&PetFilter {
            location: Some("rosario".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(any_case.len(), 2);

    let bounded = pets
        .list(&PetFilter {
            min_age: Some(2),
            max_age: Some(4),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<_> = bounded.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Michi", "Luna"]);

    let adopted = pets
        .list(&PetFilter {
            status: Some(PetStatus::Adopted),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(adopted.is_empty());
}

#[tokio::test]
async fn should_update_and_delete_pet() {
    let state = test_state().await;
    let (shelter, _) = seed(&state).await;
    let pets = state.pet_repo();
    let mut pet = pets
        .create(&new_pet(&shelter, "Luna", "dog", 2, "Rosario"))
        .await
        .unwrap();

    pet.status = PetStatus::Adopted;
    pet.photo_url = Some("https://img.example.com/luna.jpg".into());
    let updated = pets.update(&pet).await.unwrap();
    assert_eq!(updated.status, PetStatus::Adopted);
    assert_eq!(updated.shelter_id, shelter.id);
    assert!(updated.updated_at >= updated.created_at);

    assert!(pets.delete(pet.id).await.unwrap());
    assert!(!pets.delete(pet.id).await.unwrap());
    assert!(pets.find_by_id(pet.id).await.unwrap().is_none());
}

#[tokio::test]
async fn should_list_requests_with_details_and_cascade() {
    let state = test_state().await;
    let (shelter, adopter) = seed(&state).await;
    let pets = state.pet_repo();
    let requests = state.adoption_repo();
    let pet = pets
        .create(&new_pet(&shelter, "Luna", "dog", 2, "Rosario"))
        .await
        .unwrap();

    let created = requests
        .create(&NewAdoptionRequest {
            pet_id: pet.id,
            adopter_id: adopter.id,
            message: "hello".into(),
            status: AdoptionStatus::Pending,
        })
        .await
        .unwrap();

    let updated = requests
        .update_status(created.id, AdoptionStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(updated.status, AdoptionStatus::Rejected);

    let for_shelter = requests.list_by_shelter(shelter.id).await.unwrap();
    assert_eq!(for_shelter.len(), 1);
    assert_eq!(for_shelter[0].pet.id, pet.id);
    assert_eq!(for_shelter[0].adopter.id, adopter.id);
    assert_eq!(for_shelter[0].request.status, AdoptionStatus::Rejected);

    assert!(requests.list_by_shelter(adopter.id).await.unwrap().is_empty());
    assert_eq!(requests.list_by_adopter(adopter.id).await.unwrap().len(), 1);

    pets.delete(pet.id).await.unwrap();
    assert!(requests.find_by_id(created.id).await.unwrap().is_none());
    assert!(
        requests
            .find_by_id(AdoptionRequestId(9_999))
            .await
            .unwrap()
            .is_none()
    );
}
