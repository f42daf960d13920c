//! SOCKS5 Protocol Constants

// SOCKS5 Protocol Version
pub const SOCKS5_VERSION: u8 = 0x05;

// SOCKS5 Commands
pub const SOCKS5_CMD_CONNECT: u8 = 0x01;
pub const SOCKS5_CMD_BIND: u8 = 0x02;
pub const SOCKS5_CMD_UDP_ASSOCIATE: u8 = 0x03;

// Address Types
pub const SOCKS5_ADDR_IPV4: u8 = 0x01;
pub const SOCKS5_ADDR_DOMAIN: u8 = 0x03;
pub const SOCKS5_ADDR_IPV6: u8 = 0x04;

// Authentication Methods
pub const SOCKS5_AUTH_NONE: u8 = 0x00;

// Response Codes
pub const SOCKS5_REPLY_SUCCESS: u8 = 0x00;

// Reserved field value
pub const SOCKS5_RESERVED: u8 = 0x00;

/// Method selection reply, sent whatever the client offered.
pub const SOCKS5_METHOD_REPLY: [u8; 2] = [SOCKS5_VERSION, SOCKS5_AUTH_NONE];

/// CONNECT success reply. The bound address and port are always reported as zero.
pub const SOCKS5_CONNECT_SUCCESS_REPLY: [u8; 10] = [
    SOCKS5_VERSION,
    SOCKS5_REPLY_SUCCESS,
    SOCKS5_RESERVED,
    SOCKS5_ADDR_IPV4,
    0,
    0,
    0,
    0,
    0,
    0,
];
