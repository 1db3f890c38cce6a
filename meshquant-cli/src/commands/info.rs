use failure::{err_msg, Error};
use meshquant::io::FileFormat;

use crate::{
    args::{GlobalArgs, InfoArgs},
    commands::{input_files, load, print_points, print_stats},
};


pub fn run(global_args: &GlobalArgs, args: &InfoArgs) -> Result<(), Error> {
    let samples = global_args.samples_or(5);

    for path in input_files(&args.path)? {
        let points = load(&path)?;
        let stats = points.stats()
            .ok_or_else(|| err_msg(format!("'{}' does not contain any vertices", path.display())))?;

        println!();
        info!("File: {} ({})", path.display(), FileFormat::Obj);
        print_stats(&stats);
        print_points("vertices", &points, samples);
        println!();
    }

    Ok(())
}
