use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    formchat::cli::main()
}
