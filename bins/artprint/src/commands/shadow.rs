//! Shadow command

use crate::ShadowArgs;
use anyhow::Result;
use artprint_image::{css_box_shadow, shadow_layers, ShadowOptions};

/// Print the shadow layers for the given parameters
pub fn run(args: &ShadowArgs) -> Result<()> {
    let layers = shadow_layers(args.layers, &options_from(args));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layers)?);
    } else {
        println!("box-shadow:\n{};", css_box_shadow(&layers));
    }
    Ok(())
}

fn options_from(args: &ShadowArgs) -> ShadowOptions {
    ShadowOptions {
        angle: args.angle,
        length: args.length,
        final_blur: args.final_blur,
        spread: args.spread,
        final_transparency: args.final_transparency,
        ..ShadowOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_defaults_match_sampler() {
        let cli = Cli::try_parse_from(["artprint", "shadow"]).unwrap();
        let Commands::Shadow(args) = cli.command else {
            panic!("expected shadow");
        };
        assert_eq!(options_from(&args), ShadowOptions::default());
    }

    #[test]
    fn test_overrides() {
        let argv = ["artprint", "shadow", "-n", "3", "--final-blur", "300", "--spread", "-2"];
        let Commands::Shadow(args) = Cli::try_parse_from(argv).unwrap().command else {
            panic!("expected shadow");
        };
        let options = options_from(&args);
        assert_eq!(args.layers, 3);
        assert_eq!(options.final_blur, 300.0);
        assert_eq!(options.spread, -2.0);
    }
}
