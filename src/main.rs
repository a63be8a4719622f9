fn main() {
    std::process::exit(hydra_setup::run_cli());
}
