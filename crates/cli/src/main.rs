//! strapi-ts - TypeScript interfaces from Strapi content-type definitions

fn main() {
    std::process::exit(strapi_ts_cli::run_cli(std::env::args()));
}
