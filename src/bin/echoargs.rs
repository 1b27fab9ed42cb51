//! Transport test double: prints each received argument on its own line,
//! debug-quoted, and performs no mail delivery. Exists purely so the
//! dispatch surface can be verified end to end.

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("No command line arguments are passed to simulated mailx");
        return;
    }
    for arg in &args {
        println!("{arg:?}");
    }
}
