/// Public landing route
pub(crate) async fn index() -> &'static str {
    "Hello World"
}
