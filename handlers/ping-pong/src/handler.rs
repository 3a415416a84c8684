use edge_function_sdk::prelude::*;

pub fn function(config: Arc<dyn Configuration>) -> Function {
    Function::new("ping_pong", "Ping Pong!").with_configuration(config)
}
