#[tokio::main]
async fn main() {
    hvac_booking_backend::run().await;
}
