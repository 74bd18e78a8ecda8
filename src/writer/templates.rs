//! Fixed text blocks of the generated files.

pub const COMMENT_SECTION: &str = "\
# Generated by Boxtron
# Based on args to Windows version of DOSBox:
# {args}

";

pub const SDL_SECTION_ACTIVE: &str = "\
[sdl]
fullscreen=true
fullresolution={resolution}
output=opengl
autolock=false
waitonerror=true

";

pub const SDL_SECTION_TEMPLATE: &str = "\
[sdl]
# fullscreen=true
# output=opengl
# autolock=false

";

pub const RENDER_SECTION_ACTIVE: &str = "\
[render]
aspect={aspect}
scaler={scaler}

";

pub const RENDER_SECTION_TEMPLATE: &str = "\
[render]
# aspect: Do aspect correction for games using 320x200 resolution.
#         Read more: https://www.dosbox.com/wiki/Dosbox.conf#aspect
# scaler: Specifies which scaler is used to enlarge and enhance low resolution
#         modes, before any scaling done through OpenGL.
#         Read more: https://www.dosbox.com/wiki/Dosbox.conf#scaler
";

// cycles=auto leaves real-mode games at 3000 cycles, far too slow for most
// of them; `max 95%` works for both real and protected mode titles.
pub const CPU_SECTION: &str = "\
[cpu]
core=auto
cputype=auto
cycles=max 95%

";

pub const SBLASTER_SECTION: &str = "\
[sblaster]
sbtype=sb16
sbbase={base}
irq={irq}
dma={dma}
hdma={hdma}

";

pub const SBLASTER_INFO: &str = "\
Digital Sound: Sound Blaster 16
    Base Port: {base}
          IRQ: {irq}
          DMA: {dma}";

pub const MIDI_SECTION: &str = "\
[midi]
mpu401=intelligent
mididevice=default
midiconfig={port}

";

// Port 330 is hard-coded in DOSBox.
pub const MIDI_INFO: &str = "\
        Music: General MIDI (MPU-401 compatible)
         Port: 330";

pub const MIDI_INFO_NA: &str = "\
        Music: No MIDI synthesiser found";

pub const DOS_SECTION: &str = "\
[dos]
xms={xms}
ems={ems}
umb={umb}

";

pub const AUTO_HEADER: &str = "\
# Generated by Boxtron
# This file is re-created on every run

";

/// Substitute `{name}` placeholders in a template.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{}}}", name), value)
    })
}
