use haltnet_node::run_cli;
use haltnet_node::util::shutdown::install_ctrl_c_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    install_ctrl_c_handler();

    run_cli().await
}
