fn main() {
    fjpeg_cli::main();
}
