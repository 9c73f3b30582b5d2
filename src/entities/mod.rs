//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod apollo_config;
pub mod bot_config;
pub mod menu_option;
pub mod server_name;
pub mod stock_item;

// Re-export specific types to avoid conflicts
pub use apollo_config::{
    Column as ApolloConfigColumn, Entity as ApolloConfig, Model as ApolloConfigModel,
};
pub use bot_config::{Column as BotConfigColumn, Entity as BotConfig, Model as BotConfigModel};
pub use menu_option::{Column as MenuOptionColumn, Entity as MenuOption, Model as MenuOptionModel};
pub use server_name::{
    Column as ServerNameColumn, Entity as ServerName, Model as ServerNameModel,
};
pub use stock_item::{Column as StockItemColumn, Entity as StockItem, Model as StockItemModel};
