use hiddev::Config;
use hiddev::DeviceClass;
use std::path::PathBuf;

mod cmd {
    pub mod dump;

    #[cfg(feature = "sysfs")]
    pub mod scan;
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Class {
    Other,
    Keyboard,
    Pointer,
    KeyboardPointer,
}

impl From<Class> for DeviceClass {
    fn from(class: Class) -> Self {
        match class {
            Class::Other => DeviceClass::Other,
            Class::Keyboard => DeviceClass::Keyboard,
            Class::Pointer => DeviceClass::Pointer,
            Class::KeyboardPointer => DeviceClass::KeyboardPointer,
        }
    }
}

#[derive(clap::Parser)]
enum Command {
    /// Dump a binary report descriptor file
    Dump {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Dump the report descriptors of all HID devices in sysfs
    #[cfg(feature = "sysfs")]
    Scan {
        #[arg(long, default_value = hiddev::sysfs::HID_DEVICES)]
        root: PathBuf,
    },
}

#[derive(clap::Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Device class used to answer queries
    #[arg(long, value_enum, default_value = "other")]
    class: Class,

    /// Report what pointer devices actually describe instead of a boot mouse
    #[arg(long)]
    no_boot_compat: bool,
}

fn main() {
    env_logger::init();

    let Args {
        command,
        class,
        no_boot_compat,
    } = clap::Parser::parse();

    let config = Config {
        pointer_boot_compat: !no_boot_compat,
        ..Config::default()
    };

    let result = match command {
        Command::Dump { path } => cmd::dump::run(&path, class.into(), config),

        #[cfg(feature = "sysfs")]
        Command::Scan { root } => cmd::scan::run(&root, class.into(), config),
    };

    if let Err(err) = result {
        log::error!("{err}");
        std::process::exit(1);
    }
}
