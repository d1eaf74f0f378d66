use celebra::{
    ui::app::App,
    util::{hook::set_panic_hook, log::initialize_logging},
};
use color_eyre::eyre::Result;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    set_panic_hook();
    initialize_logging()?;

    App::new()?.run().await
}
