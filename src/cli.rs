mod parser;
mod tracing;

pub(crate) use parser::{Cli, ClassifyArgs, Commands, FilterArgs, RedisArgs, ServeArgs, SlackArgs};
pub(crate) use tracing::{init as init_tracing, parse_level};
