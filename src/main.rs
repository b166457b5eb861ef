use rocket::*;

mod routes;
mod store;

use store::ScoreStore;

fn rocket(store: ScoreStore) -> Rocket<Build> {
    rocket::build()
        .mount(
            "/",
            routes![
                routes::index,
                routes::get_scores,
                routes::submit_score,
                routes::get_player_scores,
                routes::reset_scores,
                routes::health
            ],
        )
        .register(
            "/",
            catchers![
                routes::request_error::not_found,
                routes::request_error::internal_error
            ],
        )
        .manage::<ScoreStore>(store)
}

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    // Connect to the score store
    dotenv::dotenv().ok();
    let database_url =
        dotenv::var("DATABASE_URL").expect("DATABASE_URL environment variable is not set");
    let op_timeout = dotenv::var("STORE_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse().ok())
        .map(std::time::Duration::from_millis)
        .unwrap_or(store::DEFAULT_OP_TIMEOUT);

    let store = ScoreStore::connect(&database_url, op_timeout)
        .await
        .expect("failed to connect to the score store");

    // On a shutdown signal the rocket stops accepting new requests and
    // drains the in-flight ones before launch() returns.
    let teardown = store.clone();
    rocket(store).launch().await?;

    // Release the store connection last
    teardown.close().await;
    Ok(())
}
