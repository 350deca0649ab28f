fn main() {
    account_switch::main();
}
