use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romprops_lib::RomContext;

pub(crate) fn run_list(ctx: &RomContext) {
    println!("Supported systems:");
    println!();

    let mut current_manufacturer = "";

    for family in ctx.families() {
        let manufacturer = family.system.manufacturer();
        if manufacturer != current_manufacturer {
            if !current_manufacturer.is_empty() {
                println!();
            }
            current_manufacturer = manufacturer;
            println!(
                "{}:",
                current_manufacturer.if_supports_color(Stdout, |t| t.bold()),
            );
        }

        let images: Vec<&str> = family.image_types.iter().map(|t| t.name()).collect();

        println!(
            "  {} [{}]",
            family
                .system
                .short_name()
                .if_supports_color(Stdout, |t| t.bold()),
            family
                .system
                .display_name()
                .if_supports_color(Stdout, |t| t.cyan()),
        );
        println!("    Extensions: {}", family.extensions.join(", "));
        if !images.is_empty() {
            println!("    External images: {}", images.join(", "));
        }
    }
}
