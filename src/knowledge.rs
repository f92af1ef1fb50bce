//! Manufacturer knowledge base.
//!
//! Four curated lookup tables drive identity resolution: plugin-name
//! fragments, free-text regex patterns, install-folder fragments, and
//! literal byte signatures for binary scanning. The tables are compiled
//! once at process start and the resulting [`KnowledgeBase`] is shared
//! read-only across all resolution calls; caller-supplied alias overrides
//! are merged before the base is handed out.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

/// Plugin-name fragment -> manufacturer. Keys are lowercase fragments of
/// plugin names, not manufacturer names. This is the most trusted source:
/// embedded vendor fields are frequently resellers, but a product name
/// rarely lies about its developer.
const NAME_TO_MANUFACTURER: &[(&str, &str)] = &[
    // Antares
    ("auto-tune", "Antares"),
    ("autotune", "Antares"),
    ("throat", "Antares"),
    ("harmony engine", "Antares"),
    ("mic mod", "Antares"),
    ("avox", "Antares"),
    ("articulator", "Antares"),
    ("aspire", "Antares"),
    ("mutator", "Antares"),
    ("sybil", "Antares"),
    ("vocal eq", "Antares"),
    // iZotope
    ("ozone", "iZotope"),
    ("neutron", "iZotope"),
    ("nectar", "iZotope"),
    ("rx", "iZotope"),
    ("neoverb", "iZotope"),
    ("trash", "iZotope"),
    ("insight", "iZotope"),
    ("vocalsynth", "iZotope"),
    ("vocal synth", "iZotope"),
    ("stutter edit", "iZotope"),
    ("breaktweaker", "iZotope"),
    ("ddly", "iZotope"),
    ("vinyl", "iZotope"),
    ("tonal balance", "iZotope"),
    ("dialogue match", "iZotope"),
    ("voice de-noise", "iZotope"),
    ("de-clip", "iZotope"),
    ("de-click", "iZotope"),
    ("de-crackle", "iZotope"),
    ("de-reverb", "iZotope"),
    ("spectral de-noise", "iZotope"),
    ("dialogue isolate", "iZotope"),
    ("music rebalance", "iZotope"),
    // FabFilter
    ("pro-q", "FabFilter"),
    ("pro-c", "FabFilter"),
    ("pro-l", "FabFilter"),
    ("pro-r", "FabFilter"),
    ("pro-mb", "FabFilter"),
    ("pro-ds", "FabFilter"),
    ("pro-g", "FabFilter"),
    ("saturn", "FabFilter"),
    ("timeless", "FabFilter"),
    ("volcano", "FabFilter"),
    ("simplon", "FabFilter"),
    // Waves
    ("abbey road", "Waves"),
    ("h-delay", "Waves"),
    ("h-comp", "Waves"),
    ("h-reverb", "Waves"),
    ("l1", "Waves"),
    ("l2", "Waves"),
    ("l3", "Waves"),
    ("linear phase", "Waves"),
    ("maxxbass", "Waves"),
    ("manny marroquin", "Waves"),
    ("deesser", "Waves"),
    ("doubler", "Waves"),
    ("metaflanger", "Waves"),
    ("mondomod", "Waves"),
    ("morphoder", "Waves"),
    ("nx", "Waves"),
    ("puigchild", "Waves"),
    ("puigtec", "Waves"),
    ("q10", "Waves"),
    ("rbass", "Waves"),
    ("rvox", "Waves"),
    ("scheps", "Waves"),
    ("sibilance", "Waves"),
    ("supertap", "Waves"),
    ("trans-x", "Waves"),
    ("trueverb", "Waves"),
    ("ultramaximizer", "Waves"),
    ("vitamin", "Waves"),
    ("vocal rider", "Waves"),
    ("vocalrider", "Waves"),
    ("z-noise", "Waves"),
    ("kramer", "Waves"),
    ("brauer", "Waves"),
    ("renaissance", "Waves"),
    ("waves tune", "Waves"),
    ("wavestune", "Waves"),
    // Valhalla DSP
    ("valhalla", "Valhalla DSP"),
    // Soundtoys
    ("decapitator", "Soundtoys"),
    ("echoboy", "Soundtoys"),
    ("crystallizer", "Soundtoys"),
    ("microshift", "Soundtoys"),
    ("panman", "Soundtoys"),
    ("tremolator", "Soundtoys"),
    ("filterfreak", "Soundtoys"),
    ("phasemistress", "Soundtoys"),
    ("primaltap", "Soundtoys"),
    ("radiator", "Soundtoys"),
    ("devil-loc", "Soundtoys"),
    ("littleplate", "Soundtoys"),
    ("little plate", "Soundtoys"),
    ("alterboy", "Soundtoys"),
    ("sie-q", "Soundtoys"),
    // Plugin Alliance / Brainworx
    ("bx_", "Plugin Alliance"),
    ("brainworx", "Plugin Alliance"),
    ("elysia", "Plugin Alliance"),
    ("lindell", "Plugin Alliance"),
    ("millennia", "Plugin Alliance"),
    ("neold", "Plugin Alliance"),
    ("shadow hills", "Plugin Alliance"),
    ("unfiltered audio", "Plugin Alliance"),
    // Universal Audio
    ("uad", "Universal Audio"),
    ("neve", "Universal Audio"),
    ("studer", "Universal Audio"),
    ("pultec", "Universal Audio"),
    ("fairchild", "Universal Audio"),
    ("la-2a", "Universal Audio"),
    ("1176", "Universal Audio"),
    ("capitol chambers", "Universal Audio"),
    ("galaxy tape", "Universal Audio"),
    ("ocean way", "Universal Audio"),
    // Native Instruments
    ("kontakt", "Native Instruments"),
    ("massive", "Native Instruments"),
    ("reaktor", "Native Instruments"),
    ("guitar rig", "Native Instruments"),
    ("battery", "Native Instruments"),
    ("fm8", "Native Instruments"),
    ("absynth", "Native Instruments"),
    ("maschine", "Native Instruments"),
    ("monark", "Native Instruments"),
    ("replika", "Native Instruments"),
    ("supercharger", "Native Instruments"),
    ("transient master", "Native Instruments"),
    ("komplete", "Native Instruments"),
    ("session guitarist", "Native Instruments"),
    ("session horns", "Native Instruments"),
    ("session strings", "Native Instruments"),
    // Arturia
    ("analog lab", "Arturia"),
    ("pigments", "Arturia"),
    ("mini v", "Arturia"),
    ("jupiter", "Arturia"),
    ("cs-80", "Arturia"),
    ("matrix-12", "Arturia"),
    ("synclavier", "Arturia"),
    ("buchla", "Arturia"),
    ("mellotron", "Arturia"),
    ("piano v", "Arturia"),
    ("stage-73", "Arturia"),
    ("wurli", "Arturia"),
    ("farfisa", "Arturia"),
    ("vox continental", "Arturia"),
    ("comp vca", "Arturia"),
    ("comp tube", "Arturia"),
    ("comp fet", "Arturia"),
    ("pre 1973", "Arturia"),
    ("delay tape", "Arturia"),
    ("rev intensity", "Arturia"),
    ("efx fragments", "Arturia"),
    ("augmented", "Arturia"),
    // Softube
    ("console 1", "Softube"),
    ("tsar", "Softube"),
    ("amp room", "Softube"),
    ("model 72", "Softube"),
    ("weiss", "Softube"),
    ("summit audio", "Softube"),
    ("saturation knob", "Softube"),
    ("heartbeat", "Softube"),
    ("parallels", "Softube"),
    // Slate Digital
    ("virtual tape", "Slate Digital"),
    ("virtual console", "Slate Digital"),
    ("virtual mix rack", "Slate Digital"),
    ("vmr", "Slate Digital"),
    ("vms", "Slate Digital"),
    ("vbc", "Slate Digital"),
    ("vcc", "Slate Digital"),
    ("fg-x", "Slate Digital"),
    ("fg-mu", "Slate Digital"),
    ("fg-116", "Slate Digital"),
    ("fresh air", "Slate Digital"),
    ("revival", "Slate Digital"),
    ("infinity eq", "Slate Digital"),
    ("verbsuite", "Slate Digital"),
    // Eventide
    ("h3000", "Eventide"),
    ("h910", "Eventide"),
    ("h949", "Eventide"),
    ("instant phaser", "Eventide"),
    ("instant flanger", "Eventide"),
    ("omnipressor", "Eventide"),
    ("ultratap", "Eventide"),
    ("blackhole", "Eventide"),
    ("mangledverb", "Eventide"),
    ("micropitch", "Eventide"),
    ("quadravox", "Eventide"),
    ("shimmerverb", "Eventide"),
    ("sp2016", "Eventide"),
    ("physion", "Eventide"),
    ("spliteq", "Eventide"),
    // Celemony
    ("melodyne", "Celemony"),
    // Sonnox
    ("oxford", "Sonnox"),
    ("inflator", "Sonnox"),
    ("envolution", "Sonnox"),
    ("claro", "Sonnox"),
    ("voxdoubler", "Sonnox"),
    // Tokyo Dawn Records
    ("tdr ", "Tokyo Dawn Records"),
    ("slick eq", "Tokyo Dawn Records"),
    ("kotelnikov", "Tokyo Dawn Records"),
    ("limiter 6", "Tokyo Dawn Records"),
    ("molotok", "Tokyo Dawn Records"),
    // LiquidSonics
    ("seventh heaven", "LiquidSonics"),
    ("reverberate", "LiquidSonics"),
    ("cinematic rooms", "LiquidSonics"),
    ("lustrous plates", "LiquidSonics"),
    // Acustica Audio
    ("acqua", "Acustica Audio"),
    ("nebula", "Acustica Audio"),
    ("amethyst", "Acustica Audio"),
    ("ultramarine", "Acustica Audio"),
    ("titanium", "Acustica Audio"),
    // IK Multimedia
    ("amplitube", "IK Multimedia"),
    ("t-racks", "IK Multimedia"),
    ("modo bass", "IK Multimedia"),
    ("modo drum", "IK Multimedia"),
    ("miroslav", "IK Multimedia"),
    ("sampletank", "IK Multimedia"),
    ("syntronik", "IK Multimedia"),
    ("lurssen", "IK Multimedia"),
    // Xfer Records
    ("serum", "Xfer Records"),
    ("cthulhu", "Xfer Records"),
    ("ott", "Xfer Records"),
    ("lfotool", "Xfer Records"),
    // Spectrasonics
    ("omnisphere", "Spectrasonics"),
    ("keyscape", "Spectrasonics"),
    ("trilian", "Spectrasonics"),
    ("stylus", "Spectrasonics"),
    // u-he
    ("diva", "u-he"),
    ("hive", "u-he"),
    ("zebra", "u-he"),
    ("repro", "u-he"),
    ("bazille", "u-he"),
    ("presswerk", "u-he"),
    ("satin", "u-he"),
    ("colour copy", "u-he"),
    ("podolski", "u-he"),
    ("tyrell", "u-he"),
    ("protoverb", "u-he"),
    ("filterscape", "u-he"),
    ("uhbik", "u-he"),
    // Kilohearts
    ("phase plant", "Kilohearts"),
    ("snap heap", "Kilohearts"),
    ("multipass", "Kilohearts"),
    ("disperser", "Kilohearts"),
    ("faturator", "Kilohearts"),
    // Cableguys
    ("shaperbox", "Cableguys"),
    ("volumeshaper", "Cableguys"),
    ("filtershaper", "Cableguys"),
    ("timeshaper", "Cableguys"),
    ("panshaper", "Cableguys"),
    ("wideshaper", "Cableguys"),
    ("halftime", "Cableguys"),
    // Polyverse
    ("manipulator", "Polyverse"),
    ("gatekeeper", "Polyverse"),
    ("filterverse", "Polyverse"),
    // Goodhertz
    ("vulf compressor", "Goodhertz"),
    ("lossy", "Goodhertz"),
    ("wow control", "Goodhertz"),
    ("tone control", "Goodhertz"),
    ("faraday limiter", "Goodhertz"),
    ("canopener", "Goodhertz"),
    ("trem control", "Goodhertz"),
    // Baby Audio
    ("comeback kid", "Baby Audio"),
    ("crystalline", "Baby Audio"),
    ("ba-1", "Baby Audio"),
    ("super vhs", "Baby Audio"),
    ("parallel aggressor", "Baby Audio"),
    ("taip", "Baby Audio"),
    ("smooth operator", "Baby Audio"),
    ("spaced out", "Baby Audio"),
    // Oeksound
    ("soothe", "Oeksound"),
    ("spiff", "Oeksound"),
    // PSPaudioware
    ("psp ", "PSPaudioware"),
    ("vintage warmer", "PSPaudioware"),
    ("xenon", "PSPaudioware"),
    ("infinistrip", "PSPaudioware"),
    // DMGAudio
    ("compassion", "DMGAudio"),
    ("equilibrium", "DMGAudio"),
    ("essence", "DMGAudio"),
    ("expurgate", "DMGAudio"),
    ("limitless", "DMGAudio"),
    ("multiplicity", "DMGAudio"),
    ("pitchfunk", "DMGAudio"),
    ("trackcomp", "DMGAudio"),
    ("tracklimit", "DMGAudio"),
    // Audio Damage
    ("dubstation", "Audio Damage"),
    ("phosphor", "Audio Damage"),
    ("ratshack reverb", "Audio Damage"),
    ("replicant", "Audio Damage"),
    ("rough rider", "Audio Damage"),
    // McDSP
    ("compressor bank", "McDSP"),
    ("filterbank", "McDSP"),
    ("ml4000", "McDSP"),
    ("mc2000", "McDSP"),
    ("futzbox", "McDSP"),
    ("analog channel", "McDSP"),
    // Acon Digital
    ("acoustica", "Acon Digital"),
    ("declick", "Acon Digital"),
    ("declipper", "Acon Digital"),
    ("deconvolver", "Acon Digital"),
    ("dehum", "Acon Digital"),
    ("denoise", "Acon Digital"),
    ("deverb", "Acon Digital"),
    ("equalize", "Acon Digital"),
    ("verberate", "Acon Digital"),
    ("restoration suite", "Acon Digital"),
    // 2CAudio
    ("aether", "2CAudio"),
    ("breeze", "2CAudio"),
    ("b2", "2CAudio"),
    ("kaleidoscope", "2CAudio"),
    ("precedence", "2CAudio"),
    // Overloud
    ("th-u", "Overloud"),
    ("mark studio", "Overloud"),
    ("springage", "Overloud"),
    ("breverb", "Overloud"),
    ("rematrix", "Overloud"),
    // Blue Cat Audio
    ("blue cat", "Blue Cat Audio"),
    ("patchwork", "Blue Cat Audio"),
    ("mb-7", "Blue Cat Audio"),
    ("destructor", "Blue Cat Audio"),
    ("late replies", "Blue Cat Audio"),
    // Steinberg
    ("halion", "Steinberg"),
    ("groove agent", "Steinberg"),
    ("padshop", "Steinberg"),
    ("retrologue", "Steinberg"),
    ("backbone", "Steinberg"),
    ("prologue", "Steinberg"),
    ("spector", "Steinberg"),
    // SSL
    ("ssl native", "SSL"),
    ("bus compressor", "SSL"),
    ("x-eq", "SSL"),
    ("x-comp", "SSL"),
    ("drumstrip", "SSL"),
    ("vocalstrip", "SSL"),
    ("flexpander", "SSL"),
    // Zynaptiq
    ("adaptiverb", "Zynaptiq"),
    ("pitchmap", "Zynaptiq"),
    ("unveil", "Zynaptiq"),
    ("unfilter", "Zynaptiq"),
    ("unmix", "Zynaptiq"),
    ("wormhole", "Zynaptiq"),
    // Newfangled Audio
    ("elevate", "Newfangled Audio"),
    ("pendulate", "Newfangled Audio"),
    // Leapwing Audio
    ("centerone", "Leapwing Audio"),
    ("dynone", "Leapwing Audio"),
    ("rootone", "Leapwing Audio"),
    ("stageone", "Leapwing Audio"),
    ("al schmitt", "Leapwing Audio"),
    // Vertigo Sound
    ("vsc-2", "Vertigo Sound"),
    ("vsc-3", "Vertigo Sound"),
    ("vsm-3", "Vertigo Sound"),
    // Tone Empire
    ("reelight pro", "Tone Empire"),
    ("goliath", "Tone Empire"),
    ("loc-ness", "Tone Empire"),
    ("firechild", "Tone Empire"),
    ("neural q", "Tone Empire"),
    // Black Rooster Audio
    ("vpre-73", "Black Rooster Audio"),
    ("ro-gold", "Black Rooster Audio"),
    ("magnetite", "Black Rooster Audio"),
    ("vla-2a", "Black Rooster Audio"),
    ("vla-3a", "Black Rooster Audio"),
    // UJAM
    ("finisher", "UJAM"),
    ("beatmaker", "UJAM"),
    ("virtual guitarist", "UJAM"),
    ("virtual bassist", "UJAM"),
    ("virtual drummer", "UJAM"),
    ("usynth", "UJAM"),
    // Neural DSP
    ("archetype", "Neural DSP"),
    ("parallax", "Neural DSP"),
    ("quad cortex", "Neural DSP"),
    ("gojira", "Neural DSP"),
    ("plini", "Neural DSP"),
    // Dear Reality
    ("exoverb", "Dear Reality"),
    ("dearvr", "Dear Reality"),
    // Devious Machines
    ("infiltrator", "Devious Machines"),
    ("pitch monster", "Devious Machines"),
    // AIR Music Technology
    ("xpand", "AIR Music Technology"),
    ("vacuum", "AIR Music Technology"),
    ("velvet", "AIR Music Technology"),
    ("mini grand", "AIR Music Technology"),
    ("db-33", "AIR Music Technology"),
    // Rob Papen
    ("predator", "Rob Papen"),
    ("subboombass", "Rob Papen"),
    ("go2", "Rob Papen"),
    ("rp-verb", "Rob Papen"),
    ("rp-delay", "Rob Papen"),
    ("rp-distort", "Rob Papen"),
    // Reveal Sound
    ("spire", "Reveal Sound"),
    // LennarDigital
    ("sylenth", "LennarDigital"),
    // Synapse Audio
    ("dune", "Synapse Audio"),
    ("obsession", "Synapse Audio"),
    ("the legend", "Synapse Audio"),
    // Waldorf
    ("largo", "Waldorf"),
    ("nave", "Waldorf"),
    ("ppg wave", "Waldorf"),
    ("d-pole", "Waldorf"),
    // TAL
    ("tal-", "TAL-Togu Audio Line"),
    ("noisemaker", "TAL-Togu Audio Line"),
    ("elek7ro", "TAL-Togu Audio Line"),
    // MeldaProduction
    ("mautopitch", "MeldaProduction"),
    ("mequalizer", "MeldaProduction"),
    ("mcompressor", "MeldaProduction"),
    ("mlimiter", "MeldaProduction"),
    ("mreverb", "MeldaProduction"),
    ("mflanger", "MeldaProduction"),
    // Analog Obsession
    ("britpre", "Analog Obsession"),
    ("lala", "Analog Obsession"),
    ("britchannel", "Analog Obsession"),
    ("channev", "Analog Obsession"),
    // Voxengo
    ("span", "Voxengo"),
    ("elephant", "Voxengo"),
    ("deft compressor", "Voxengo"),
    ("gliss eq", "Voxengo"),
    ("warmifier", "Voxengo"),
    ("teote", "Voxengo"),
    ("boogex", "Voxengo"),
    ("crunchessor", "Voxengo"),
    ("marquis", "Voxengo"),
    // Audiority
    ("polaris", "Audiority"),
    ("grainspace", "Audiority"),
    ("the abuser", "Audiority"),
    ("solidus", "Audiority"),
    // Chow DSP
    ("chow", "Chow DSP"),
    // Output
    ("thermal", "Output"),
    ("portal", "Output"),
    ("exhale", "Output"),
    ("movement", "Output"),
    ("arcade", "Output"),
    ("analog strings", "Output"),
    ("analog brass", "Output"),
    // D16 Group
    ("lush", "D16 Group"),
    ("decimort", "D16 Group"),
    ("devastor", "D16 Group"),
    ("drumazon", "D16 Group"),
    ("fazortan", "D16 Group"),
    ("godfazer", "D16 Group"),
    ("punchbox", "D16 Group"),
    ("redoptor", "D16 Group"),
    ("sigmund", "D16 Group"),
    ("syntorus", "D16 Group"),
    ("toraverb", "D16 Group"),
    ("phoscyon", "D16 Group"),
    // Glitchmachines
    ("cataract", "Glitchmachines"),
    ("cryogen", "Glitchmachines"),
    ("fracture", "Glitchmachines"),
    ("hysteresis", "Glitchmachines"),
    ("palindrome", "Glitchmachines"),
    // Auburn Sounds
    ("graillon", "Auburn Sounds"),
    ("couture", "Auburn Sounds"),
    // TBProAudio
    ("dseq", "TBProAudio"),
    ("dpmeq", "TBProAudio"),
    ("isol8", "TBProAudio"),
    ("gseq", "TBProAudio"),
    // Boz Digital Labs
    ("mongoose", "Boz Digital Labs"),
    ("the wall", "Boz Digital Labs"),
    ("bark of dog", "Boz Digital Labs"),
    ("+10db", "Boz Digital Labs"),
    ("manic compressor", "Boz Digital Labs"),
    ("imperial delay", "Boz Digital Labs"),
    // SIR Audio Tools
    ("standard clip", "SIR Audio Tools"),
    ("standard channel", "SIR Audio Tools"),
    // Fuse Audio Labs
    ("rs-w2395c", "Fuse Audio Labs"),
    ("vce-118", "Fuse Audio Labs"),
    ("vpre-31a", "Fuse Audio Labs"),
    ("vqp-150", "Fuse Audio Labs"),
    // Klanghelm
    ("dc8c", "Klanghelm"),
    ("dc1a", "Klanghelm"),
    ("mjuc", "Klanghelm"),
    ("sdrr", "Klanghelm"),
    ("ivgi", "Klanghelm"),
    ("vumt", "Klanghelm"),
    // Cherry Audio
    ("voltage modular", "Cherry Audio"),
    ("memorymode", "Cherry Audio"),
    ("dco-106", "Cherry Audio"),
    ("ca2600", "Cherry Audio"),
    ("dreamsynth", "Cherry Audio"),
    ("elka-x", "Cherry Audio"),
    ("polymode", "Cherry Audio"),
    ("miniverse", "Cherry Audio"),
    // Sonarworks
    ("soundid", "Sonarworks"),
    // Metric Halo
    ("channelstrip", "Metric Halo"),
    ("haloverb", "Metric Halo"),
    ("transientcontrol", "Metric Halo"),
    // Flux
    ("pure limiter", "Flux"),
    ("pure compressor", "Flux"),
    ("syrah", "Flux"),
    ("epure", "Flux"),
    ("bittersweet", "Flux"),
    ("spat revolution", "Flux"),
    // Harrison
    ("mixbus", "Harrison"),
    ("xt-mc", "Harrison"),
    ("xt-ds", "Harrison"),
    ("xt-eg", "Harrison"),
    ("32c channel", "Harrison"),
    // Sonible
    ("smart:eq", "Sonible"),
    ("smarteq", "Sonible"),
    ("smart eq", "Sonible"),
    ("smart:comp", "Sonible"),
    ("smartcomp", "Sonible"),
    ("smart comp", "Sonible"),
    ("smart:limit", "Sonible"),
    ("smartlimit", "Sonible"),
    ("smart limit", "Sonible"),
    ("smart:reverb", "Sonible"),
    ("smartreverb", "Sonible"),
    ("smart reverb", "Sonible"),
    ("smart:gate", "Sonible"),
    ("smartgate", "Sonible"),
    ("smart gate", "Sonible"),
    ("smart:deess", "Sonible"),
    ("smartdeess", "Sonible"),
    ("true:balance", "Sonible"),
    ("true balance", "Sonible"),
    ("true:level", "Sonible"),
    ("true level", "Sonible"),
    ("pure:deess", "Sonible"),
    ("pure:unmask", "Sonible"),
    ("pure:eq", "Sonible"),
    ("pure:comp", "Sonible"),
    ("pure:verb", "Sonible"),
    ("pure:limit", "Sonible"),
    ("proximity:eq+", "Sonible"),
    ("entropy:eq+", "Sonible"),
    ("frei:raum", "Sonible"),
    ("freiraum", "Sonible"),
    ("prime:vocal", "Sonible"),
];

/// Short name-fragment keys that are trusted despite being under the
/// minimum token length. Everything else that short is skipped to avoid
/// spurious substring hits.
const SHORT_KEY_WHITELIST: &[&str] = &[
    "rx", "nx", "vmr", "vms", "vbc", "vcc", "ba-1", "b2", "l1", "l2", "l3", "dc8c", "dc1a",
    "mjuc", "ott", "bx_",
];

/// Case-insensitive regex patterns applied to free text (copyright strings,
/// company fields, filenames, binary prefixes). Order matters: first match
/// wins.
const MANUFACTURER_PATTERNS: &[(&str, &str)] = &[
    (r"\bantares\b", "Antares"),
    (r"\bauto[-\s]?tune\b", "Antares"),
    (r"\bizotope\b", "iZotope"),
    (r"\bsoundtoys\b", "Soundtoys"),
    (r"\bplugin[-\s]?alliance\b", "Plugin Alliance"),
    (r"\bbrainworx\b", "Plugin Alliance"),
    (r"\bfabfilter\b", "FabFilter"),
    (r"\bvalhalla\b", "Valhalla DSP"),
    (r"\boeksound\b", "Oeksound"),
    (r"\bwaves\b", "Waves"),
    (r"\bacustica(?:[-\s]?audio)?\b", "Acustica Audio"),
    (r"\bslate[-\s]?digital\b", "Slate Digital"),
    (r"\buniversal[-\s]?audio\b", "Universal Audio"),
    (r"\buad\b", "Universal Audio"),
    (r"\barturia\b", "Arturia"),
    (r"\bnative[-\s]?instruments\b", "Native Instruments"),
    (r"\bsoftube\b", "Softube"),
    (r"\bliquidsonics\b", "LiquidSonics"),
    (r"\btokyo[-\s]?dawn\b", "Tokyo Dawn Records"),
    (r"\btdr\b", "Tokyo Dawn Records"),
    (r"\bik[-\s]?multimedia\b", "IK Multimedia"),
    (r"\beventide\b", "Eventide"),
    (r"\bmcdsp\b", "McDSP"),
    (r"\bsonnox\b", "Sonnox"),
    (r"\b2caudio\b", "2CAudio"),
    (r"\baudio[-\s]?damage\b", "Audio Damage"),
    (r"\bacon[-\s]?digital\b", "Acon Digital"),
    (r"\bgoodhertz\b", "Goodhertz"),
    (r"\bpsp[a-z]*\b", "PSPaudioware"),
    (r"\bdmgaudio\b", "DMGAudio"),
    (r"\bkilohearts\b", "Kilohearts"),
    (r"\bujam\b", "UJAM"),
    (r"\bsteinberg\b", "Steinberg"),
    (r"\blexicon\b", "Lexicon"),
    (r"\btc[-\s]?electronic\b", "TC Electronic"),
    (r"\bcelemony\b", "Celemony"),
    (r"\boverloud\b", "Overloud"),
    (r"\bbaby[-\s]?audio\b", "Baby Audio"),
    (r"\baudiothing\b", "AudioThing"),
    (r"\bxfer\b", "Xfer Records"),
    (r"\bspectrasonics\b", "Spectrasonics"),
    (r"\bu[-]?he\b", "u-he"),
    (r"\bcableguys\b", "Cableguys"),
    (r"\bpolyverse\b", "Polyverse"),
    (r"\bblue[-\s]?cat\b", "Blue Cat Audio"),
    (r"\bssl\b", "SSL"),
    (r"\bsolid[-\s]?state[-\s]?logic\b", "SSL"),
    (r"\bzynaptiq\b", "Zynaptiq"),
    (r"\bnewfangled\b", "Newfangled Audio"),
    (r"\bneural[-\s]?dsp\b", "Neural DSP"),
    (r"\bdear[-\s]?reality\b", "Dear Reality"),
    (r"\bdevious[-\s]?machines\b", "Devious Machines"),
    (r"\bair[-\s]?music\b", "AIR Music Technology"),
    (r"\brob[-\s]?papen\b", "Rob Papen"),
    (r"\breveal[-\s]?sound\b", "Reveal Sound"),
    (r"\blennar\b", "LennarDigital"),
    (r"\bsynapse\b", "Synapse Audio"),
    (r"\bwaldorf\b", "Waldorf"),
    (r"\btal[-\s]", "TAL-Togu Audio Line"),
    (r"\bmelda\b", "MeldaProduction"),
    (r"\bvoxengo\b", "Voxengo"),
    (r"\baudiority\b", "Audiority"),
    (r"\boutput\b", "Output"),
    (r"\bd16\b", "D16 Group"),
    (r"\bglitchmachines\b", "Glitchmachines"),
    (r"\bcherry[-\s]?audio\b", "Cherry Audio"),
    (r"\bsonarworks\b", "Sonarworks"),
    (r"\bmetric[-\s]?halo\b", "Metric Halo"),
    (r"\bflux\b", "Flux"),
    (r"\bharrison\b", "Harrison"),
    (r"\bklanghelm\b", "Klanghelm"),
    (r"\bboz\b", "Boz Digital Labs"),
    (r"\btbproaudio\b", "TBProAudio"),
    (r"\bauburn\b", "Auburn Sounds"),
    (r"\bblack[-\s]?rooster\b", "Black Rooster Audio"),
    (r"\btone[-\s]?empire\b", "Tone Empire"),
    (r"\bleapwing\b", "Leapwing Audio"),
    (r"\bvertigo\b", "Vertigo Sound"),
    (r"\bfuse[-\s]?audio\b", "Fuse Audio Labs"),
    (r"\bsir[-\s]?audio\b", "SIR Audio Tools"),
    (r"\banalog[-\s]?obsession\b", "Analog Obsession"),
    (r"\bsonible\b", "Sonible"),
];

/// Install-folder fragment -> manufacturer. The least trusted table:
/// shared "Program Files\VST" folders and reseller-branded directories make
/// folder names misleading, so this fires only as the last resolution stage.
const FOLDER_TO_MANUFACTURER: &[(&str, &str)] = &[
    ("izotope", "iZotope"),
    ("antares", "Antares"),
    ("fabfilter", "FabFilter"),
    ("waves", "Waves"),
    ("valhalla", "Valhalla DSP"),
    ("soundtoys", "Soundtoys"),
    ("plugin alliance", "Plugin Alliance"),
    ("brainworx", "Plugin Alliance"),
    ("slate digital", "Slate Digital"),
    ("universal audio", "Universal Audio"),
    ("arturia", "Arturia"),
    ("native instruments", "Native Instruments"),
    ("softube", "Softube"),
    ("liquidsonics", "LiquidSonics"),
    ("tokyo dawn", "Tokyo Dawn Records"),
    ("ik multimedia", "IK Multimedia"),
    ("eventide", "Eventide"),
    ("mcdsp", "McDSP"),
    ("sonnox", "Sonnox"),
    ("acustica audio", "Acustica Audio"),
    ("acustica", "Acustica Audio"),
    ("celemony", "Celemony"),
    ("xfer records", "Xfer Records"),
    ("xfer", "Xfer Records"),
    ("spectrasonics", "Spectrasonics"),
    ("u-he", "u-he"),
    ("uhe", "u-he"),
    ("kilohearts", "Kilohearts"),
    ("cableguys", "Cableguys"),
    ("polyverse", "Polyverse"),
    ("goodhertz", "Goodhertz"),
    ("oeksound", "Oeksound"),
    ("pspaudioware", "PSPaudioware"),
    ("psp", "PSPaudioware"),
    ("dmgaudio", "DMGAudio"),
    ("dmg audio", "DMGAudio"),
    ("audio damage", "Audio Damage"),
    ("acon digital", "Acon Digital"),
    ("2caudio", "2CAudio"),
    ("overloud", "Overloud"),
    ("blue cat", "Blue Cat Audio"),
    ("steinberg", "Steinberg"),
    ("solid state logic", "SSL"),
    ("ssl", "SSL"),
    ("zynaptiq", "Zynaptiq"),
    ("newfangled", "Newfangled Audio"),
    ("neural dsp", "Neural DSP"),
    ("dear reality", "Dear Reality"),
    ("ujam", "UJAM"),
    ("baby audio", "Baby Audio"),
    ("audiothing", "AudioThing"),
    ("rob papen", "Rob Papen"),
    ("reveal sound", "Reveal Sound"),
    ("lennardigital", "LennarDigital"),
    ("synapse audio", "Synapse Audio"),
    ("waldorf", "Waldorf"),
    ("tal", "TAL-Togu Audio Line"),
    ("meldaproduction", "MeldaProduction"),
    ("melda", "MeldaProduction"),
    ("sonible", "Sonible"),
];

/// Literal ASCII brand signatures searched in bounded binary prefixes after
/// the regex patterns have failed.
const BINARY_SIGNATURES: &[(&[u8], &str)] = &[
    (b"iZotope", "iZotope"),
    (b"Antares", "Antares"),
    (b"FabFilter", "FabFilter"),
    (b"Waves", "Waves"),
    (b"Valhalla", "Valhalla DSP"),
    (b"Soundtoys", "Soundtoys"),
    (b"Plugin Alliance", "Plugin Alliance"),
    (b"Brainworx", "Plugin Alliance"),
    (b"Slate Digital", "Slate Digital"),
    (b"Universal Audio", "Universal Audio"),
    (b"Arturia", "Arturia"),
    (b"Native Instruments", "Native Instruments"),
    (b"Softube", "Softube"),
    (b"LiquidSonics", "LiquidSonics"),
    (b"Eventide", "Eventide"),
    (b"Celemony", "Celemony"),
    (b"Oeksound", "Oeksound"),
    (b"Goodhertz", "Goodhertz"),
    (b"Baby Audio", "Baby Audio"),
    (b"Kilohearts", "Kilohearts"),
    (b"Xfer Records", "Xfer Records"),
    (b"u-he", "u-he"),
    (b"Cableguys", "Cableguys"),
    (b"DMGAudio", "DMGAudio"),
    (b"PSPaudioware", "PSPaudioware"),
    (b"Acustica Audio", "Acustica Audio"),
    (b"sonible", "Sonible"),
];

/// Canonical spellings for manufacturer strings that arrive in cosmetically
/// different forms. Applied during normalization, after resolution.
const MANUFACTURER_ALIASES: &[(&str, &str)] = &[
    ("sonible", "Sonible"),
    ("sonible gmbh", "Sonible"),
    ("plugin alliance", "Plugin Alliance"),
    ("brainworx", "Brainworx (Plugin Alliance)"),
    ("bx", "Brainworx (Plugin Alliance)"),
    ("2caudio", "2CAudio"),
    ("acustica", "Acustica Audio"),
    ("acustica audio", "Acustica Audio"),
    ("u-he", "u-he"),
    ("softube", "Softube"),
    ("izotope", "iZotope"),
];

static PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    MANUFACTURER_PATTERNS
        .iter()
        .map(|(pattern, manufacturer)| {
            let re = Regex::new(&format!("(?i){pattern}")).expect("valid manufacturer pattern");
            (re, *manufacturer)
        })
        .collect()
});

static LEGAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(Inc\.?|LLC\.?|Ltd\.?|GmbH|Corp\.?|Co\.?)$").unwrap());

static COPYRIGHT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(Copyright|©|\(c\))\s*\d*\s*").unwrap());

/// Read-only manufacturer knowledge base.
///
/// Construct once (optionally with alias overrides), then share by reference
/// across workers. Nothing here is mutated after construction.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    aliases: HashMap<String, String>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase {
    pub fn new() -> Self {
        let aliases = MANUFACTURER_ALIASES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { aliases }
    }

    /// Build a base with caller-supplied alias overrides merged in.
    /// Overrides win on key collision; the merged table is then frozen.
    pub fn with_aliases<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut base = Self::new();
        for (key, value) in overrides {
            base.aliases
                .insert(key.as_ref().trim().to_lowercase(), value.into());
        }
        base
    }

    /// Look up a manufacturer by plugin name fragment.
    ///
    /// Tested two ways: the raw lowercased name (keeps `bx_` and `tal-`
    /// prefixes intact) and a whitespace/hyphen-collapsed form (catches
    /// "virtual mix rack", "smart eq"). Keys shorter than four characters
    /// after separator stripping are skipped unless whitelisted.
    pub fn match_name(&self, name: &str) -> Option<&'static str> {
        let name_lower = name.to_lowercase();
        let name_collapsed = collapse_separators(&name_lower);

        for &(key, manufacturer) in NAME_TO_MANUFACTURER {
            let plain: String = key
                .chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_' | ':'))
                .collect();
            if plain.chars().count() < 4 && !SHORT_KEY_WHITELIST.contains(&key) {
                continue;
            }

            if name_lower.contains(key) {
                return Some(manufacturer);
            }
            let key_collapsed = collapse_separators(key);
            if !key_collapsed.is_empty() && name_collapsed.contains(&key_collapsed) {
                return Some(manufacturer);
            }
        }
        None
    }

    /// First pattern-table hit in the given free text, if any.
    pub fn match_pattern(&self, text: &str) -> Option<&'static str> {
        PATTERNS
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, manufacturer)| *manufacturer)
    }

    /// Folder heuristic: does any path component or substring name a known
    /// manufacturer directory?
    pub fn match_folder(&self, path: &Path) -> Option<&'static str> {
        let full = path.to_string_lossy().to_lowercase();
        for &(key, manufacturer) in FOLDER_TO_MANUFACTURER {
            if full.contains(key) {
                return Some(manufacturer);
            }
        }
        for part in path.iter() {
            let part_lower = part.to_string_lossy().to_lowercase();
            for &(key, manufacturer) in FOLDER_TO_MANUFACTURER {
                if part_lower.contains(key) {
                    return Some(manufacturer);
                }
            }
        }
        None
    }

    /// Scan a bounded binary prefix: regex patterns over a lossy text view
    /// first, then literal ASCII brand signatures over the raw bytes.
    pub fn search_binary(&self, data: &[u8]) -> Option<&'static str> {
        if data.is_empty() {
            return None;
        }
        let text = String::from_utf8_lossy(data);
        if let Some(manufacturer) = self.match_pattern(&text) {
            return Some(manufacturer);
        }
        BINARY_SIGNATURES
            .iter()
            .find(|(signature, _)| contains_bytes(data, signature))
            .map(|(_, manufacturer)| *manufacturer)
    }

    /// Clean a raw vendor string: trim punctuation, strip trailing legal
    /// suffixes and leading copyright markers, then canonicalize through the
    /// pattern table. Returns `None` when nothing usable remains.
    pub fn clean_manufacturer(&self, raw: &str) -> Option<String> {
        let mut name = raw.trim().trim_end_matches([',', '.']).trim().to_string();
        name = LEGAL_SUFFIX.replace(&name, "").into_owned();
        name = COPYRIGHT_PREFIX.replace(&name, "").into_owned();
        let name = name.trim();
        if name.chars().count() < 2 {
            return None;
        }
        if let Some(canonical) = self.match_pattern(name) {
            return Some(canonical.to_string());
        }
        Some(name.to_string())
    }

    /// Canonical alias for a manufacturer string, if one is registered.
    pub fn alias(&self, manufacturer: &str) -> Option<&str> {
        self.aliases
            .get(&manufacturer.trim().to_lowercase())
            .map(String::as_str)
    }
}

fn collapse_separators(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c == '-' || c.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() || haystack.len() < needle.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}
