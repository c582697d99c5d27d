use rand::seq::SliceRandom;

use crate::storage::types::Animal;

/// Reliable dog facts for when the provider is down.
pub const DOG_FACTS: [&str; 10] = [
    "Dogs have three eyelids. The third lid, called a nictitating membrane or 'haw,' keeps the eye lubricated and protected.",
    "A dog's nose print is unique, similar to a person's fingerprint.",
    "Dalmatians are born completely white, and develop their spots as they grow older.",
    "Dogs' sense of smell is about 40 times better than humans.",
    "Greyhounds can reach speeds of up to 45 miles per hour.",
    "The Basenji is the only breed of dog that cannot bark.",
    "A dog's average body temperature is 101.2 degrees Fahrenheit.",
    "The Labrador Retriever has been the most popular dog breed in the United States for over 30 years.",
    "Dogs have about 1,700 taste buds. Humans have approximately 9,000.",
    "Dogs curl up in a ball when sleeping to protect their organs, a holdover from their days in the wild.",
];

/// Reliable cat facts for when the provider is down.
pub const CAT_FACTS: [&str; 10] = [
    "Cats make about 100 different sounds. Dogs make only about 10.",
    "A cat's brain is biologically more similar to a human brain than it is to a dog's.",
    "Cats have over 20 muscles that control their ears.",
    "Cats sleep 70% of their lives.",
    "Cats can jump up to six times their length.",
    "A house cat's genome is 95.6% tiger.",
    "Cats are believed to be the only mammals who don't taste sweetness.",
    "Cats have an extra organ that allows them to taste scents in the air.",
    "Adult cats only meow to communicate with humans, not other cats.",
    "A cat's purr vibrates at a frequency of 25 to 150 hertz, which can promote healing.",
];

/// Picks a random canned fact for the given animal.
pub fn local_fact(animal: Animal) -> &'static str {
    let pool: &[&str] = match animal {
        Animal::Dog => &DOG_FACTS,
        Animal::Cat => &CAT_FACTS,
    };
    pool.choose(&mut rand::thread_rng()).copied().unwrap_or(pool[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_facts_are_non_empty() {
        for _ in 0..20 {
            assert!(!local_fact(Animal::Cat).is_empty());
            assert!(!local_fact(Animal::Dog).is_empty());
        }
    }

    #[test]
    fn local_fact_comes_from_the_right_list() {
        for _ in 0..20 {
            assert!(CAT_FACTS.contains(&local_fact(Animal::Cat)));
            assert!(DOG_FACTS.contains(&local_fact(Animal::Dog)));
        }
    }
}
