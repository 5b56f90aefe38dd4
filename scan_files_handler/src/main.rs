use anyhow::Context as _;
use aws_config::Region;
use aws_lambda_events::s3::S3Event;
use lambda_runtime::{
    Error, LambdaEvent, run, service_fn,
    tracing::{self},
};
use scan_entrypoint::ScanEntrypoint;
use scan_files_handler::{config::Config, context::Context, handler, service};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let entrypoint = ScanEntrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env(entrypoint.environment()).context("failed to read config")?;

    let mut aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = config.region.clone() {
        aws_config = aws_config.region(Region::new(region));
    }
    let aws_config = aws_config.load().await;

    let ssm_client = service::ssm::SSM::new(aws_sdk_ssm::Client::new(&aws_config));
    let s3_client = service::s3::S3::new(aws_sdk_s3::Client::new(&aws_config));
    tracing::trace!("initialized aws clients");

    let ctx = Context::build(&ssm_client, s3_client, config, |api_key, config| {
        service::scan_files::ScanFiles::new(&config.scan_files_url, api_key, config.timeouts())
    })
    .await?;
    tracing::trace!(url = %ctx.config.scan_files_url, "initialized scan files client");

    let func = service_fn(move |event: LambdaEvent<S3Event>| {
        let ctx = ctx.clone();
        async move { handler::handler(ctx, event).await }
    });

    run(func).await
}
