use std::sync::Arc;

use rust_decimal_macros::dec;
use sqlx::PgPool;

use dealership::domain::entities::{CarStatus, NewCar};
use dealership::domain::repositories::CarRepository;
use dealership::error::AppError;
use dealership::infrastructure::persistence::PgCarRepository;

fn new_car(make: &str, model: &str, vin: Option<&str>) -> NewCar {
    NewCar {
        make: make.to_string(),
        model: model.to_string(),
        year: 2021,
        price: dec!(18500.00),
        mileage: 24_000,
        color: "Blue".to_string(),
        interior_color: None,
        fuel_type: "Gasoline".to_string(),
        transmission: "Automatic".to_string(),
        drivetrain: Some("AWD".to_string()),
        body_style: Some("SUV".to_string()),
        engine: None,
        trim: Some("XLE".to_string()),
        condition: "used".to_string(),
        status: CarStatus::Available,
        number_of_seats: Some(5),
        number_of_doors: Some(4),
        mpg_city: Some(27),
        mpg_highway: Some(35),
        safety_rating: Some(dec!(4.5)),
        dealer_rating: None,
        days_on_market: None,
        vehicle_history: Some("Clean".to_string()),
        financing: true,
        images: vec!["https://cdn.example.com/rav4.jpg".to_string()],
        description: None,
        vin: vin.map(str::to_string),
        features: vec!["Bluetooth".to_string(), "Backup Camera".to_string()],
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgCarRepository::new(Arc::new(pool));

    let created = repo.create(new_car("Toyota", "RAV4", None)).await.unwrap();
    let found = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(found.make, "Toyota");
    assert_eq!(found.price, dec!(18500.00));
    assert_eq!(found.safety_rating, Some(dec!(4.5)));
    assert_eq!(found.features, vec!["Bluetooth", "Backup Camera"]);
    assert_eq!(found.status, CarStatus::Available);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_list_all_in_id_order(pool: PgPool) {
    let repo = PgCarRepository::new(Arc::new(pool));

    let first = repo.create(new_car("Toyota", "Camry", None)).await.unwrap();
    let second = repo.create(new_car("Honda", "Civic", None)).await.unwrap();

    let cars = repo.list_all().await.unwrap();

    assert_eq!(
        cars.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_update_and_delete(pool: PgPool) {
    let repo = PgCarRepository::new(Arc::new(pool));
    let mut car = repo.create(new_car("Ford", "F-150", None)).await.unwrap();

    car.status = CarStatus::Sold;
    car.trim = None;
    let updated = repo.update(car.clone()).await.unwrap();
    assert_eq!(updated.status, CarStatus::Sold);
    assert_eq!(updated.trim, None);

    assert!(repo.delete(car.id).await.unwrap());
    assert!(!repo.delete(car.id).await.unwrap());
    assert!(repo.find_by_id(car.id).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_vin_is_conflict(pool: PgPool) {
    let repo = PgCarRepository::new(Arc::new(pool));
    let vin = Some("1HGCM82633A004352");

    repo.create(new_car("Honda", "Accord", vin)).await.unwrap();
    let err = repo.create(new_car("Honda", "Accord", vin)).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}
