pub mod generation_server;
