// turbokeys - Linux configurator for cheap CH55x-based USB macro keypads
// Key spec grammar, report encoding, and device session handling

pub mod channel;
pub mod devices;
pub mod hid;
pub mod key_binding;
pub mod negotiate;
pub mod protocol;
pub mod report;
pub mod session;

pub use channel::{ChannelError, DeviceChannel};
pub use devices::{
    find_device, is_supported, parse_physical_key, physical_key_name, DeviceDefinition,
    SUPPORTED_DEVICES,
};
pub use key_binding::{KeyBinding, ParseBindingError};
pub use negotiate::{negotiate, NoResponsiveFirmware};
pub use report::{encode, encode_flash, encode_layer_switch, encode_led_mode, EncodeError, Report};
pub use session::{Session, SessionError};
