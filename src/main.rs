use clap::Parser;
use mandel_world::{CliArgs, CliRenderController, PpmFilePresenter, logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    logging::init(args.log_config());

    let mut controller =
        CliRenderController::new(PpmFilePresenter::new()).with_colour_map(args.colour_map);
    let elapsed_millis = controller.generate(&args.compute_config())?.elapsed_millis();
    controller.write(&args.out)?;

    println!("Total execution time is {elapsed_millis} ms.");

    Ok(())
}
