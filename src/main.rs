fn main() -> std::process::ExitCode {
    amap_travel::run()
}
