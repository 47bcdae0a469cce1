use corank::*;

/// Exact-rank selection over a file of integers
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to input (one integer per line)
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    input:      PathBuf,

    /// Target rank, 0-based (e.g., 99 keeps the 100 smallest values in front)
    #[arg(short, long)]
    #[arg(value_parser = clap::value_parser!(Pos))]
    rank:       Pos,

    /// Block size handed to the concurrent partitioner
    #[arg(short, long, default_value_t = 1024)]
    #[arg(value_parser = clap::value_parser!(Pos))]
    block:      Pos,
}

fn main() {
    let cli = Args::parse();
    assert!(cli.input.exists() && cli.input.is_file(), "Invalid input path");
    let mut values = read_values_from_path(cli.input).unwrap();

    let total_start = Instant::now();
    match corank::algo::select_top(&mut values, cli.rank, cli.block) {
        Ok(at) => {
            println!(
                "Selection time: {} μs",
                total_start.elapsed().as_micros()
            );
            println!("Rank {} value:\t{}", cli.rank, values[at]);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
