// src/quiz/bank.rs

use crate::models::question::Question;

/// The Nestor trivia, in play order.
pub static TRIVIA_QUESTIONS: [Question; 10] = [
    Question::new(
        "Vilket år bildades Nestor ursprungligen (även om de tog en lång paus)?",
        ["1984", "1989", "1992", "2021"],
        1,
    ),
    Question::new(
        "Från vilken svensk stad kommer bandet?",
        ["Skövde", "Göteborg", "Falköping", "Trollhättan"],
        2,
    ),
    Question::new(
        "Vad heter deras genombrottsalbum från 2021?",
        [
            "The Golden Age",
            "Ghost Town Rockers",
            "Kids in a Ghost Town",
            "Falköping Nights",
        ],
        2,
    ),
    Question::new(
        "Vilken 80-talsikon sjunger med i låten 'Tomorrow'?",
        ["Bonnie Tyler", "Samantha Fox", "Cyndi Lauper", "Lita Ford"],
        1,
    ),
    Question::new(
        "Vad heter singeln där de sjunger om ett specifikt år som definierar deras sound?",
        ["1984", "1987", "1989", "1991"],
        2,
    ),
    Question::new(
        "Vilken genre brukar Nestors musik främst beskrivas som?",
        ["Death Metal", "AOR / Melodic Rock", "Grunge", "Punk Rock"],
        1,
    ),
    Question::new(
        "Vem är bandets karismatiska huvudsångare?",
        [
            "Tobias Gustavsson",
            "Jonny Wemmenstedt",
            "Martin Frejinger",
            "Mattias Carlsson",
        ],
        0,
    ),
    Question::new(
        "Vilket instrument spelar Martin Frejinger, som ger bandet dess autentiska 80-talssound?",
        ["Trummor", "Keyboards / Synth", "Sologitarr", "Saxofon"],
        1,
    ),
    Question::new(
        "Vilket ikoniskt svenskt band har Nestor turnerat med under 2024?",
        ["Europe", "The Hives", "Ghost", "Roxette"],
        0,
    ),
    Question::new(
        "I musikvideon till 'Kids in a Ghost Town', var befinner sig bandet främst?",
        [
            "På en rymdstation",
            "I en gammal gymnastiksal",
            "På en båt i skärgården",
            "I en övergiven gruva",
        ],
        1,
    ),
];
