use failure::{Error, ResultExt};
use meshquant::normalize::Method;

use crate::{
    args::{GlobalArgs, NormalizeArgs},
    commands::{input_files, load, print_points},
};


pub fn run(global_args: &GlobalArgs, args: &NormalizeArgs) -> Result<(), Error> {
    let samples = global_args.samples_or(5);
    let methods = if args.methods.is_empty() {
        vec![Method::MinMax]
    } else {
        args.methods.clone()
    };

    for path in input_files(&args.path)? {
        let points = load(&path)?;

        println!();
        info!("File: {}", path.display());
        for &method in &methods {
            let normalized = method.normalizer()
                .normalize(&points)
                .context(format!("failed to normalize '{}' ({})", path.display(), method))?;

            println!("  [{}] {}", method.to_string().to_uppercase(), normalized.params);
            print_points("normalized vertices", &normalized.points, samples);
        }
        println!();
    }

    Ok(())
}
