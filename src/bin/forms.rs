// Prints every canonical form of each argument.
// Run with: cargo run --bin forms -- முருகன் murugan "Sri Lakshmi"
use search_core::core::converter::clusters;
use search_core::CanonicalForms;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: forms <text>...");
        std::process::exit(2);
    }
    for text in &args {
        println!("{text}");
        println!("  clusters: {}", clusters(text).count());
        println!("  record:");
        for (stage, form) in CanonicalForms::for_record(text).stages() {
            println!("    {stage:?}: {form}");
        }
        println!("  query:");
        for (stage, form) in CanonicalForms::for_query(text).stages() {
            println!("    {stage:?}: {form}");
        }
    }
}
