fn main() -> anyhow::Result<()> {
    verigraph_lib::main()
}
