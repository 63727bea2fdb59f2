//! `tugboat images`

use color_eyre::Result;
use tugboat_api::requests::ImageFilter;
use tugboat_api::responses::Image;

use crate::context::Context;
use crate::output;

pub async fn list(ctx: &Context, global: bool) -> Result<()> {
    let mine = ctx.client.list_images(ImageFilter::MyImages).await?;
    println!("My Images:");
    print_images(&mine);

    if global {
        let global_images = ctx.client.list_images(ImageFilter::Global).await?;
        println!();
        println!("Global Images:");
        print_images(&global_images);
    }

    Ok(())
}

fn print_images(images: &[Image]) {
    if images.is_empty() {
        println!("No images found");
    }
    for image in images {
        println!("{}", output::image_line(image));
    }
}
