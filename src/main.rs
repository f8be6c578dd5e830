use anyhow::Result;
use clap::Parser;
use vott2mask::{vott_to_masks, Args, ConvertOptions};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    vott_to_masks(
        &args.annotation_file,
        &args.mask_dir,
        ConvertOptions::from(&args),
    )?;

    println!("Mask images generation completed");
    Ok(())
}
