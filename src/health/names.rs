//! Names of well-known community probes.
//!
//! Use these when decorating a probe registered by a third-party integration
//! so the lookup matches the name that integration registers under.

pub const ARANGO_DB: &str = "arangodb";
pub const AZURE_BLOB_STORAGE: &str = "azureblob";
pub const AZURE_COSMOS_DB: &str = "cosmosdb";
pub const AZURE_EVENT_HUB: &str = "azureeventhub";
pub const AZURE_IOT_HUB: &str = "iothub";
pub const AZURE_KEY_VAULT: &str = "azurekeyvault";
pub const AZURE_SERVICE_BUS_QUEUE: &str = "azurequeue";
pub const AZURE_SERVICE_BUS_TOPIC: &str = "azuretopic";
pub const AZURE_SERVICE_BUS_SUBSCRIPTION: &str = "azuresubscription";
pub const AZURE_TABLE: &str = "azuretable";
pub const AZURE_QUEUE_STORAGE: &str = "azurequeue";
pub const CLOUD_FIRESTORE: &str = "cloud firestore";
pub const CONSUL: &str = "consul";
pub const DISK_STORAGE: &str = "diskstorage";
pub const DNS_RESOLVE: &str = "dns";
pub const DOCUMENT_DB: &str = "documentdb";
pub const DYNAMO_DB: &str = "dynamodb";
pub const ELASTIC_SEARCH: &str = "elasticsearch";
pub const EVENTSTORE: &str = "eventstore";
pub const FTP: &str = "ftp";
pub const GREMLIN: &str = "gremlin";
pub const HANGFIRE: &str = "hangfire";
pub const IBM_MQ: &str = "ibmmq";
pub const IDENTITY_SERVER: &str = "idsvr";
pub const IMAP: &str = "imap";
pub const KAFKA: &str = "kafka";
pub const KUBERNETES: &str = "k8s";
pub const MONGO_DB: &str = "mongodb";
pub const MYSQL: &str = "mysql";
pub const NPGSQL: &str = "npgsql";
pub const ORACLE: &str = "oracle";
pub const PING: &str = "ping";
pub const PRIVATE_MEMORY: &str = "privatememory";
pub const PROCESS_ALLOCATED_MEMORY: &str = "process_allocated_memory";
pub const PROCESS_HEALTH: &str = "process";
pub const RABBIT_MQ: &str = "rabbitmq";
pub const RAVEN_DB: &str = "ravendb";
pub const REDIS: &str = "redis";
pub const S3: &str = "aws s3";
pub const SEND_GRID: &str = "sendgrid";
pub const SEQ: &str = "seq";
pub const SFTP: &str = "sftp";
pub const SIGNALR: &str = "signalr";
pub const SMTP: &str = "smtp";
pub const SOLR: &str = "solr";
pub const SQLITE: &str = "sqlite";
pub const SQL_SERVER: &str = "sqlserver";
pub const TCP: &str = "tcp";
pub const URL_GROUP: &str = "uri-group";
pub const VIRTUAL_MEMORY_SIZE: &str = "virtualmemory";
pub const WINDOWS_SERVICE: &str = "windowsservice";
pub const WORKING_SET: &str = "workingset";

/// Every well-known name, in declaration order.
pub const ALL: &[&str] = &[
    ARANGO_DB,
    AZURE_BLOB_STORAGE,
    AZURE_COSMOS_DB,
    AZURE_EVENT_HUB,
    AZURE_IOT_HUB,
    AZURE_KEY_VAULT,
    AZURE_SERVICE_BUS_QUEUE,
    AZURE_SERVICE_BUS_TOPIC,
    AZURE_SERVICE_BUS_SUBSCRIPTION,
    AZURE_TABLE,
    AZURE_QUEUE_STORAGE,
    CLOUD_FIRESTORE,
    CONSUL,
    DISK_STORAGE,
    DNS_RESOLVE,
    DOCUMENT_DB,
    DYNAMO_DB,
    ELASTIC_SEARCH,
    EVENTSTORE,
    FTP,
    GREMLIN,
    HANGFIRE,
    IBM_MQ,
    IDENTITY_SERVER,
    IMAP,
    KAFKA,
    KUBERNETES,
    MONGO_DB,
    MYSQL,
    NPGSQL,
    ORACLE,
    PING,
    PRIVATE_MEMORY,
    PROCESS_ALLOCATED_MEMORY,
    PROCESS_HEALTH,
    RABBIT_MQ,
    RAVEN_DB,
    REDIS,
    S3,
    SEND_GRID,
    SEQ,
    SFTP,
    SIGNALR,
    SMTP,
    SOLR,
    SQLITE,
    SQL_SERVER,
    TCP,
    URL_GROUP,
    VIRTUAL_MEMORY_SIZE,
    WINDOWS_SERVICE,
    WORKING_SET,
];
