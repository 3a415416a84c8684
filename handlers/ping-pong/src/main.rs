//! ping_pong edge function
mod handler;

edge_function_sdk::handler_loop!(handler::function);
