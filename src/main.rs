// The screen is a single event loop; keep it on one thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    room_booking::run().await
}
