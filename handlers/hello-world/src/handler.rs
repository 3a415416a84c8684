use edge_function_sdk::prelude::*;

pub const GREETING: &str = "Hello World!";

pub fn function(config: Arc<dyn Configuration>) -> Function {
    Function::new("hello_world", GREETING).with_configuration(config)
}
